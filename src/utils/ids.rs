//! Instance identifiers drawn from the game RNG, so seeded runs repeat exactly.

use rand::Rng;
use uuid::{Builder, Uuid};

pub fn random_uuid(rng: &mut impl Rng) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}
