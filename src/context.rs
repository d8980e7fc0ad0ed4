//! Caller identity passed into synchronization passes.
//!
//! Authorization happens before this crate is invoked; the context only
//! tells the engine which household to operate on and who triggered the
//! pass (for audit fields on records it creates).

#[derive(Debug, Clone)]
pub struct HouseholdContext {
    pub household_id: String,
    pub acting_person_id: String,
}

impl HouseholdContext {
    pub fn new(household_id: impl Into<String>, acting_person_id: impl Into<String>) -> Self {
        HouseholdContext {
            household_id: household_id.into(),
            acting_person_id: acting_person_id.into(),
        }
    }
}
