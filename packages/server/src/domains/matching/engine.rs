//! Pure matching engine: scores and ranks eligible physician supervisors.
//!
//! No I/O, no randomness. Identical inputs always produce identical,
//! order-stable output; callers load candidates (with capacity snapshots)
//! and persist whatever the engine returns.

use crate::common::clinical::{specialties_related, specialty_matches};
use crate::common::{PhysicianProfileId, UserId};
use crate::domains::physicians::capacity::CapacitySnapshot;
use crate::domains::physicians::models::PhysicianProfile;
use crate::domains::requests::models::CollaborationRequest;

/// Scoring bands. The four sum to 100.
const STATE_OVERLAP_POINTS: f64 = 30.0;
const SPECIALTY_EXACT_POINTS: f64 = 20.0;
const SPECIALTY_RELATED_POINTS: f64 = 10.0;
const PRACTICE_MODEL_POINTS: f64 = 30.0;
const CAPACITY_HEADROOM_POINTS: f64 = 20.0;

/// One physician considered for a request, with capacity read at ranking time.
#[derive(Debug, Clone)]
pub struct EngineCandidate {
    pub profile: PhysicianProfile,
    pub capacity: CapacitySnapshot,
}

impl EngineCandidate {
    pub fn new(profile: PhysicianProfile, active_supervisees: i64) -> Self {
        let capacity = CapacitySnapshot::new(
            profile.is_active,
            profile.max_supervisees,
            active_supervisees,
        );
        Self { profile, capacity }
    }
}

/// A candidate that survived filtering, scored and explained.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub physician_profile_id: PhysicianProfileId,
    pub physician_user_id: UserId,
    /// Total score, 0-100.
    pub score: i32,
    /// Contributing factors in scoring order, each with its point value.
    pub reasons: Vec<String>,
}

/// Rank all eligible candidates for a request, best first.
///
/// Hard filters (not scored): zero licensed-state overlap with the request,
/// or no open capacity. Ties break on ascending profile id so the output is
/// deterministic. An empty candidate set yields an empty ranking.
pub fn rank(request: &CollaborationRequest, candidates: &[EngineCandidate]) -> Vec<RankedCandidate> {
    let mut scored: Vec<(f64, RankedCandidate)> = candidates
        .iter()
        .filter(|candidate| is_eligible(request, candidate))
        .map(|candidate| score_candidate(request, candidate))
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .total_cmp(score_a)
            .then(a.physician_profile_id.cmp(&b.physician_profile_id))
    });

    scored.into_iter().map(|(_, ranked)| ranked).collect()
}

/// Hard eligibility: at least one shared state, and an open slot.
fn is_eligible(request: &CollaborationRequest, candidate: &EngineCandidate) -> bool {
    shared_state_count(request, &candidate.profile) > 0 && candidate.capacity.has_capacity()
}

fn shared_state_count(request: &CollaborationRequest, profile: &PhysicianProfile) -> usize {
    request
        .states_requested
        .iter()
        .filter(|state| {
            profile
                .licensed_states
                .iter()
                .any(|licensed| licensed.eq_ignore_ascii_case(state))
        })
        .count()
}

fn score_candidate(
    request: &CollaborationRequest,
    candidate: &EngineCandidate,
) -> (f64, RankedCandidate) {
    let profile = &candidate.profile;
    let mut total = 0.0;
    let mut reasons = Vec::new();

    // License-state overlap, proportional to requested coverage.
    let shared = shared_state_count(request, profile);
    let requested = request.states_requested.len();
    let state_points = STATE_OVERLAP_POINTS * shared as f64 / requested as f64;
    total += state_points;
    reasons.push(format!(
        "Licensed in {} of {} requested states (+{:.0})",
        shared, requested, state_points
    ));

    // Specialty: exact beats related; unrelated contributes nothing.
    let exact = profile
        .specialties
        .iter()
        .any(|offered| specialty_matches(&request.specialty, offered));
    if exact {
        total += SPECIALTY_EXACT_POINTS;
        reasons.push(format!(
            "Specialty match: {} (+{:.0})",
            request.specialty, SPECIALTY_EXACT_POINTS
        ));
    } else if profile
        .specialties
        .iter()
        .any(|offered| specialties_related(&request.specialty, offered))
    {
        total += SPECIALTY_RELATED_POINTS;
        reasons.push(format!(
            "Related specialty coverage (+{:.0})",
            SPECIALTY_RELATED_POINTS
        ));
    }

    // Practice model: compatible when equal or either side is hybrid.
    // A hard mismatch is scored at zero rather than filtered, so near-misses
    // stay visible to the practitioner.
    if models_compatible(&request.practice_model, &profile.supervision_model) {
        total += PRACTICE_MODEL_POINTS;
        reasons.push(format!(
            "Practice model compatible: {} (+{:.0})",
            profile.supervision_model, PRACTICE_MODEL_POINTS
        ));
    }

    // Capacity headroom: spread load toward physicians with more open slots.
    let remaining = candidate.capacity.remaining_slots();
    let headroom_points =
        CAPACITY_HEADROOM_POINTS * remaining as f64 / f64::from(profile.max_supervisees);
    total += headroom_points;
    reasons.push(format!(
        "Open capacity: {} of {} slots (+{:.0})",
        remaining, profile.max_supervisees, headroom_points
    ));

    let ranked = RankedCandidate {
        physician_profile_id: profile.id,
        physician_user_id: profile.user_id,
        score: (total.round() as i32).clamp(0, 100),
        reasons,
    };

    (total, ranked)
}

fn models_compatible(practice_model: &str, supervision_model: &str) -> bool {
    practice_model == "hybrid"
        || supervision_model == "hybrid"
        || practice_model == supervision_model
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::common::{CollaborationRequestId, UserId};

    fn request(states: &[&str], specialty: &str, practice_model: &str) -> CollaborationRequest {
        CollaborationRequest {
            id: CollaborationRequestId::new(),
            practitioner_user_id: UserId::new(),
            profession_type: "np".to_string(),
            states_requested: states.iter().map(|s| s.to_string()).collect(),
            specialty: specialty.to_string(),
            practice_model: practice_model.to_string(),
            expected_start_date: Utc::now().date_naive() + chrono::Duration::days(30),
            preferred_supervision_model: None,
            status: "open".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn profile(
        states: &[&str],
        specialties: &[&str],
        supervision_model: &str,
        max_supervisees: i32,
    ) -> PhysicianProfile {
        PhysicianProfile {
            id: PhysicianProfileId::new(),
            user_id: UserId::new(),
            licensed_states: states.iter().map(|s| s.to_string()).collect(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            max_supervisees,
            supervision_model: supervision_model.to_string(),
            malpractice_confirmed: true,
            malpractice_policy_url: None,
            bio: None,
            is_active: true,
            billing_ready: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn empty_candidate_set_yields_empty_ranking() {
        let ranking = rank(&request(&["FL"], "Family Medicine", "telehealth"), &[]);
        assert!(ranking.is_empty());
    }

    #[test]
    fn excludes_candidates_with_no_state_overlap() {
        let req = request(&["FL"], "Family Medicine", "telehealth");
        let candidate = EngineCandidate::new(
            profile(&["NY", "NJ"], &["Family Medicine"], "telehealth", 3),
            0,
        );
        assert!(rank(&req, &[candidate]).is_empty());
    }

    #[test]
    fn excludes_candidates_without_capacity() {
        let req = request(&["FL"], "Family Medicine", "telehealth");
        let full = EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 2), 2);
        let inactive = {
            let mut p = profile(&["FL"], &["Family Medicine"], "telehealth", 2);
            p.is_active = false;
            EngineCandidate::new(p, 0)
        };
        assert!(rank(&req, &[full, inactive]).is_empty());
    }

    #[test]
    fn perfect_candidate_scores_full_marks() {
        let req = request(&["FL"], "Family Medicine", "telehealth");
        let candidate = EngineCandidate::new(
            profile(&["FL"], &["Family Medicine"], "telehealth", 3),
            0,
        );
        let ranking = rank(&req, &[candidate]);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].score, 100);
        assert_eq!(ranking[0].reasons.len(), 4);
    }

    #[test]
    fn state_overlap_is_proportional() {
        let req = request(&["FL", "GA", "AL"], "Family Medicine", "telehealth");
        let candidate = EngineCandidate::new(
            profile(&["FL", "GA"], &["Family Medicine"], "telehealth", 3),
            0,
        );
        let ranking = rank(&req, &[candidate]);
        // 20 (2/3 of 30) + 20 + 30 + 20 = 90
        assert_eq!(ranking[0].score, 90);
        assert!(ranking[0].reasons[0].contains("2 of 3"));
    }

    #[test]
    fn related_specialty_earns_partial_credit() {
        let req = request(&["FL"], "Family Medicine", "telehealth");
        let candidate = EngineCandidate::new(
            profile(&["FL"], &["Internal Medicine"], "telehealth", 3),
            0,
        );
        let ranking = rank(&req, &[candidate]);
        // 30 + 10 + 30 + 20 = 90
        assert_eq!(ranking[0].score, 90);
        assert!(ranking[0]
            .reasons
            .iter()
            .any(|r| r.contains("Related specialty")));
    }

    #[test]
    fn hard_model_mismatch_scores_zero_for_the_band() {
        let req = request(&["FL"], "Family Medicine", "in_person");
        let candidate = EngineCandidate::new(
            profile(&["FL"], &["Family Medicine"], "telehealth", 3),
            0,
        );
        let ranking = rank(&req, &[candidate]);
        // 30 + 20 + 0 + 20 = 70; candidate still visible.
        assert_eq!(ranking[0].score, 70);
        assert!(!ranking[0]
            .reasons
            .iter()
            .any(|r| r.contains("Practice model")));
    }

    #[test]
    fn hybrid_on_either_side_is_compatible() {
        let req = request(&["FL"], "Family Medicine", "hybrid");
        let candidate = EngineCandidate::new(
            profile(&["FL"], &["Family Medicine"], "in_person", 3),
            0,
        );
        assert_eq!(rank(&req, &[candidate])[0].score, 100);
    }

    #[test]
    fn headroom_rewards_emptier_physicians() {
        let req = request(&["FL"], "Family Medicine", "telehealth");
        let empty = EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 4), 0);
        let busy = EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 4), 3);
        let empty_id = empty.profile.id;

        let ranking = rank(&req, &[busy, empty]);
        assert_eq!(ranking[0].physician_profile_id, empty_id);
        assert_eq!(ranking[0].score, 100);
        assert_eq!(ranking[1].score, 85); // 30 + 20 + 30 + 5
    }

    #[test]
    fn ties_break_on_ascending_profile_id() {
        let req = request(&["FL"], "Family Medicine", "telehealth");
        let a = EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 3), 0);
        let b = EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 3), 0);
        let lower = a.profile.id.min(b.profile.id);

        let ranking = rank(&req, &[a, b]);
        assert_eq!(ranking[0].physician_profile_id, lower);
    }

    #[test]
    fn ranking_is_deterministic() {
        let req = request(&["FL", "GA"], "Family Medicine", "telehealth");
        let candidates = vec![
            EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 3), 1),
            EngineCandidate::new(profile(&["GA"], &["Psychiatry"], "in_person", 5), 0),
            EngineCandidate::new(
                profile(&["FL", "GA"], &["Internal Medicine"], "hybrid", 2),
                1,
            ),
        ];

        let first = rank(&req, &candidates);
        let second = rank(&req, &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn strong_fit_outranks_partial_fit() {
        // Practitioner wants FL+GA, Family Medicine, telehealth.
        let req = request(&["FL", "GA"], "Family Medicine", "telehealth");
        let strong =
            EngineCandidate::new(profile(&["FL"], &["Family Medicine"], "telehealth", 3), 0);
        let weak = EngineCandidate::new(profile(&["GA"], &["Orthopedics"], "in_person", 3), 0);
        let strong_id = strong.profile.id;

        let ranking = rank(&req, &[weak, strong]);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].physician_profile_id, strong_id);
        assert!(ranking[0].score > ranking[1].score);
        assert!(ranking[0].reasons.iter().any(|r| r.contains("1 of 2")));
        assert!(ranking[0]
            .reasons
            .iter()
            .any(|r| r.contains("Specialty match")));
    }
}
