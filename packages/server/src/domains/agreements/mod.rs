// Agreement domain: the billing-bearing lifecycle behind an accepted match
// (draft → pending_signature → active → paused/terminated) and the derived
// platform fee.

pub mod activities;
pub mod data;
pub mod fees;
pub mod models;
