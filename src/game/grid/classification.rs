//! Tile classification table.
//!
//! Maps raw tile ids to [`TileKind`]s and remembers the distinguished ids the
//! movement rules need: the walkable default that replaces spawn/coin markers,
//! the walked-trail id, and the goal id.

use std::collections::BTreeMap;

use log::debug;

use crate::config::game::{
    DEFAULT_DANGEROUS_IDS, DEFAULT_GOAL_ID, DEFAULT_NON_WALKABLE_IDS, DEFAULT_WALKED_ID,
};
use crate::game::types::{TileId, TileKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationTable {
    kinds: BTreeMap<TileId, TileKind>,
    walkable_default: TileId,
    walked: TileId,
    goal: Option<TileId>,
}

impl ClassificationTable {
    /// Table for digit maps: every digit starts as walkable, then the explicit
    /// lists are applied in order (non-walkable, dangerous, goal, walked).
    pub fn from_digit_lists(non_walkable: &[u8], dangerous: &[u8], goal: u8, walked: u8) -> Self {
        let mut kinds: BTreeMap<TileId, TileKind> = (0..=9)
            .map(|d| (TileId::from_digit(d), TileKind::Walkable))
            .collect();

        for &d in non_walkable {
            kinds.insert(TileId::from_digit(d), TileKind::NonWalkable);
        }
        for &d in dangerous {
            kinds.insert(TileId::from_digit(d), TileKind::Dangerous);
        }
        kinds.insert(TileId::from_digit(goal), TileKind::Goal);
        kinds.insert(TileId::from_digit(walked), TileKind::Walked);

        // `0` is the floor id of the digit dialect; it may have been reclassified
        // above, in which case the first still-walkable digit stands in.
        let walkable_default = Self::pick_walkable_default(&mut kinds);

        Self {
            kinds,
            walkable_default,
            walked: TileId::from_digit(walked),
            goal: Some(TileId::from_digit(goal)),
        }
    }

    /// The compiled-in table used by digit maps that carry no classification lines.
    pub fn compiled_default() -> Self {
        Self::from_digit_lists(
            DEFAULT_NON_WALKABLE_IDS,
            DEFAULT_DANGEROUS_IDS,
            DEFAULT_GOAL_ID,
            DEFAULT_WALKED_ID,
        )
    }

    /// Table for symbolic maps built from `symbol:TYPENAME` entries.
    /// Later entries for the same symbol win. The goal id is the lowest GOAL symbol.
    pub fn from_symbols<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TileId, TileKind)>,
    {
        let mut kinds: BTreeMap<TileId, TileKind> = entries.into_iter().collect();

        let declared = kinds
            .iter()
            .find(|(_, k)| **k == TileKind::Walked)
            .map(|(id, _)| *id);
        let walked = match declared {
            Some(id) => id,
            None => {
                debug!("No WALKED symbol declared, using a synthetic trail id");
                kinds.insert(TileId::TRAIL, TileKind::Walked);
                TileId::TRAIL
            }
        };

        let walkable_default = Self::pick_walkable_default(&mut kinds);
        let goal = kinds
            .iter()
            .find(|(_, k)| **k == TileKind::Goal)
            .map(|(id, _)| *id);

        Self {
            kinds,
            walkable_default,
            walked,
            goal,
        }
    }

    /// `'0'` if it is walkable, else the lowest walkable id. Without any walkable
    /// id, `'0'` is added as walkable unless already declared, in which case the
    /// lowest free id is used so declared entries keep their kind.
    fn pick_walkable_default(kinds: &mut BTreeMap<TileId, TileKind>) -> TileId {
        if kinds.get(&TileId::FLOOR) == Some(&TileKind::Walkable) {
            return TileId::FLOOR;
        }
        if let Some((id, _)) = kinds.iter().find(|(_, k)| **k == TileKind::Walkable) {
            return *id;
        }
        let free = if kinds.contains_key(&TileId::FLOOR) {
            (0..=u8::MAX).map(TileId).find(|id| !kinds.contains_key(id))
        } else {
            Some(TileId::FLOOR)
        };
        match free {
            Some(id) => {
                debug!("No walkable symbol declared, using {:?} as walkable default", id);
                kinds.insert(id, TileKind::Walkable);
                id
            }
            // Every byte is declared and none is walkable; markers keep a
            // non-walkable id, which only affects the spawn and coin cells.
            None => TileId::FLOOR,
        }
    }

    /// Kind of a tile id. Ids missing from the table are `Unknown`.
    pub fn classify(&self, id: TileId) -> TileKind {
        self.kinds.get(&id).copied().unwrap_or(TileKind::Unknown)
    }

    pub fn walkable_default(&self) -> TileId {
        self.walkable_default
    }

    pub fn walked_id(&self) -> TileId {
        self.walked
    }

    pub fn goal_id(&self) -> Option<TileId> {
        self.goal
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, TileKind)> + '_ {
        self.kinds.iter().map(|(id, kind)| (*id, *kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_lists() {
        let table = ClassificationTable::from_digit_lists(&[2, 3], &[4], 5, 6);
        assert_eq!(table.classify(TileId(b'0')), TileKind::Walkable);
        assert_eq!(table.classify(TileId(b'1')), TileKind::Walkable);
        assert_eq!(table.classify(TileId(b'2')), TileKind::NonWalkable);
        assert_eq!(table.classify(TileId(b'4')), TileKind::Dangerous);
        assert_eq!(table.classify(TileId(b'5')), TileKind::Goal);
        assert_eq!(table.classify(TileId(b'6')), TileKind::Walked);
        assert_eq!(table.walked_id(), TileId(b'6'));
        assert_eq!(table.goal_id(), Some(TileId(b'5')));
        assert_eq!(table.walkable_default(), TileId::FLOOR);
        assert_eq!(table.classify(TileId(b'x')), TileKind::Unknown);
    }

    #[test]
    fn test_reclassified_floor_falls_back() {
        let table = ClassificationTable::from_digit_lists(&[0], &[], 5, 6);
        assert_eq!(table.walkable_default(), TileId(b'1'));
    }

    #[test]
    fn test_symbols_with_walked_and_floor() {
        let table = ClassificationTable::from_symbols(vec![
            (TileId(b'0'), TileKind::Walkable),
            (TileId(b'x'), TileKind::Walked),
            (TileId(b'#'), TileKind::Goal),
        ]);
        assert_eq!(table.walked_id(), TileId(b'x'));
        assert_eq!(table.walkable_default(), TileId(b'0'));
        assert_eq!(table.goal_id(), Some(TileId(b'#')));
        assert_eq!(table.classify(TileId(b'#')), TileKind::Goal);
    }

    #[test]
    fn test_symbols_without_walked_or_floor() {
        let table = ClassificationTable::from_symbols(vec![
            (TileId(b'.'), TileKind::Walkable),
            (TileId(b'L'), TileKind::Dangerous),
        ]);
        assert_eq!(table.walked_id(), TileId::TRAIL);
        assert_eq!(table.classify(TileId::TRAIL), TileKind::Walked);
        assert_eq!(table.walkable_default(), TileId(b'.'));
    }

    #[test]
    fn test_symbols_without_any_walkable() {
        let table = ClassificationTable::from_symbols(vec![(TileId(b'L'), TileKind::Dangerous)]);
        assert_eq!(table.walkable_default(), TileId::FLOOR);
        assert_eq!(table.classify(TileId::FLOOR), TileKind::Walkable);
    }

    #[test]
    fn test_declared_floor_keeps_its_kind_without_walkable() {
        let table = ClassificationTable::from_symbols(vec![
            (TileId(b'0'), TileKind::NonWalkable),
            (TileId(b'L'), TileKind::Dangerous),
        ]);
        assert_eq!(table.classify(TileId(b'0')), TileKind::NonWalkable);
        assert_eq!(table.classify(TileId(b'L')), TileKind::Dangerous);

        // NUL went to the synthetic trail, so the next free byte is used.
        let default = table.walkable_default();
        assert_eq!(default, TileId(1));
        assert_eq!(table.classify(default), TileKind::Walkable);
        assert_ne!(default, table.walked_id());
    }

    #[test]
    fn test_compiled_default_has_every_category() {
        let table = ClassificationTable::compiled_default();
        let kinds: Vec<TileKind> = table.iter().map(|(_, k)| k).collect();
        for kind in [
            TileKind::Walkable,
            TileKind::NonWalkable,
            TileKind::Dangerous,
            TileKind::Goal,
            TileKind::Walked,
        ] {
            assert!(kinds.contains(&kind), "missing {:?}", kind);
        }
    }
}
