/// What to do with the remaining actions of a phase once one of them faults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Stop at the first fault, skipping every remaining action of the phase,
    /// including those of later context names.
    #[default]
    Abort,
    /// Keep invoking the remaining actions. The first fault is still the one
    /// reported; later faults are logged as suppressed.
    ContinueRemaining,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, bon::Builder)]
pub struct RuleOptions {
    #[builder(default)]
    pub fault_policy: FaultPolicy,
}
