use crate::*;
pub use safe_zone::*;

mod safe_zone;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}
