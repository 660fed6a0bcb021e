use lasso::{Spur, ThreadedRodeo};
use rand::distr::Alphanumeric;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Global string interner for node and connection IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Length of the random suffix in generated ids.
const SUFFIX_LEN: usize = 7;

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(Spur);

        impl $name {
            /// Intern a string, or return the existing id if already interned.
            pub fn intern(s: &str) -> Self {
                $name(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::intern(&s))
            }
        }
    };
}

interned_id!(
    /// Identifier of a canvas node (Campaign, Ad Set or Ad).
    /// Internally a 4-byte `Spur` index.
    NodeId
);

interned_id!(
    /// Identifier of a connection between two nodes.
    ConnectionId
);

/// Milliseconds since the Unix epoch from the system clock.
///
/// Not usable on `wasm32-unknown-unknown`; browser hosts pass their own clock
/// to [`IdGenerator::new`].
pub fn system_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Produces `prefix-timestamp-random` ids for new nodes and connections.
pub struct IdGenerator {
    rng: SmallRng,
    clock: fn() -> u64,
}

impl IdGenerator {
    pub fn new(seed: u64, clock: fn() -> u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            clock,
        }
    }

    /// Generator seeded from and timed by the system clock.
    pub fn system() -> Self {
        Self::new(system_millis(), system_millis)
    }

    fn next(&mut self, prefix: &str) -> String {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(self.rng.sample(Alphanumeric)).to_ascii_lowercase())
            .collect();
        format!("{prefix}-{}-{suffix}", (self.clock)())
    }

    pub fn node_id(&mut self, prefix: &str) -> NodeId {
        NodeId::intern(&self.next(prefix))
    }

    pub fn connection_id(&mut self) -> ConnectionId {
        ConnectionId::intern(&self.next("conn"))
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
