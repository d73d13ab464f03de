// Collaboration request domain: the practitioner's standing ask for
// supervision and its open → matched / closed lifecycle.

pub mod activities;
pub mod data;
pub mod models;
