/// Capabilities exercised by the supervision core.
///
/// Each lifecycle operation declares exactly one capability; the role to
/// capability mapping lives in [`super::Actor`]. Ownership checks (is this
/// MY request / MY match) stay in the activities next to the rows they
/// guard; a capability only says what kind of actor may attempt the
/// operation at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Submit a new collaboration request (practitioners).
    SubmitRequest,

    /// Close an owned collaboration request (practitioners).
    CloseRequest,

    /// Accept or decline a match (physicians).
    RespondToMatch,

    /// Create or update a draft agreement (physicians).
    DraftAgreement,

    /// Activate a signed agreement (practitioners).
    ActivateAgreement,

    /// Pause or resume an active agreement (physicians, admins).
    PauseAgreement,

    /// Terminate an agreement (physicians, practitioners, admins).
    TerminateAgreement,

    /// Record an externally captured signature (admins / system callbacks).
    RecordSignature,

    /// Flip a physician's externally verified billing flag (admins).
    VerifyBilling,
}
