//! Fixtures shared by the integration tests.

use test_context::contexts;
use test_context_testing::Journal;

pub const A_IS_SET: &str = "a is not null";
pub const B_IS_SET: &str = "b is not null";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker;

/// Two optional slots, each filled by its own named context.
#[derive(Default)]
pub struct Pair {
    pub a: Option<Marker>,
    pub b: Option<Marker>,
    pub journal: Journal,
}

#[contexts]
impl Pair {
    #[before_context("a is not null")]
    pub fn a_is_not_null(&mut self) {
        self.journal.record("before a");
        self.a = Some(Marker);
    }

    #[before_context("b is not null")]
    pub fn b_is_not_null(&mut self) {
        self.journal.record("before b");
        self.b = Some(Marker);
    }

    #[after_context("a is not null")]
    pub fn release_a(&mut self) {
        self.journal.record("after a");
        self.a = None;
    }

    #[after_context("b is not null")]
    pub fn release_b(&mut self) {
        self.journal.record("after b");
        self.b = None;
    }

    #[before_context("")]
    pub fn unnamed(&mut self) {
        self.journal.record("before unnamed");
    }
}

impl Pair {
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} is unavailable")]
pub struct Unavailable(pub &'static str);

/// External services whose setup or teardown can fail.
#[derive(Default)]
pub struct Services {
    pub warm: bool,
    pub journal: Journal,
}

#[contexts]
impl Services {
    #[before_context("database")]
    pub fn connect(&mut self) -> Result<(), Unavailable> {
        self.journal.record("connect");
        Err(Unavailable("database"))
    }

    #[before_context("database")]
    pub fn migrate(&mut self) {
        self.journal.record("migrate");
    }

    #[after_context("database")]
    pub fn disconnect(&mut self) {
        self.journal.record("disconnect");
    }

    #[before_context("cache")]
    pub fn warm_cache(&mut self) {
        self.journal.record("warm cache");
        self.warm = true;
    }

    #[after_context("cache")]
    pub fn flush_cache(&mut self) -> Result<(), Unavailable> {
        self.journal.record("flush cache");
        Err(Unavailable("cache"))
    }

    #[after_context("cache")]
    pub fn drop_cache(&mut self) {
        self.journal.record("drop cache");
        self.warm = false;
    }

    #[before_context("queue")]
    pub fn open_queue(&mut self) {
        self.journal.record("open queue");
        panic!("queue port in use");
    }

    #[after_context("logs")]
    pub fn rotate_logs(&mut self) {
        tracing::debug!("rotating logs");
        self.journal.record("rotate logs");
    }
}
