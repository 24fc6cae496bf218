/// Adversary state shared between the game loop and the power-up
/// coordinator.
///
/// The collection lives behind one `RwLock`. The loop takes the write
/// lock briefly to move everyone and the read lock to take snapshots for
/// rendering and collision checks. The coordinator takes the write lock
/// for a bulk status change and holds it until every adversary has
/// switched, so readers never see a half-updated collection.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;

use crate::domain::entity::{Adversary, Status};
use crate::domain::grid::Grid;
use crate::domain::motion::{resolve_move, Direction};

#[derive(Debug, Default)]
pub struct AdversaryState {
    adversaries: RwLock<Vec<Adversary>>,
}

impl AdversaryState {
    pub fn new(adversaries: Vec<Adversary>) -> Self {
        AdversaryState { adversaries: RwLock::new(adversaries) }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Set every adversary to `status` under a single write lock.
    pub fn bulk_set_status(&self, status: Status) {
        let mut adversaries = self.write();
        for a in adversaries.iter_mut() {
            a.status = status;
        }
    }

    /// Independent random walk: one uniform direction per adversary.
    pub fn move_all<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) {
        let mut adversaries = self.write();
        for a in adversaries.iter_mut() {
            a.pos = resolve_move(grid, a.pos, Direction::random(rng));
        }
    }

    /// Consistent copy for rendering.
    pub fn snapshot(&self) -> Vec<Adversary> {
        self.read().clone()
    }

    // A poisoned lock only means a coordinator thread panicked mid-update;
    // positions and statuses are still valid values.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Adversary>> {
        self.adversaries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Adversary>> {
        self.adversaries.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::Cell;
    use crate::domain::grid::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_from(rows: &[&str]) -> Grid {
        let cells = rows.iter().map(|r| r.chars().map(Cell::from_char).collect()).collect();
        Grid::new(cells).unwrap()
    }

    fn state_at(spawns: &[(usize, usize)]) -> AdversaryState {
        AdversaryState::new(spawns.iter().map(|&(r, c)| Adversary::new(Position::new(r, c))).collect())
    }

    #[test]
    fn bulk_update_reaches_every_adversary() {
        let s = state_at(&[(0, 0), (1, 1), (2, 2)]);
        s.bulk_set_status(Status::Empowered);
        assert!(s.snapshot().iter().all(|a| a.status == Status::Empowered));
        s.bulk_set_status(Status::Normal);
        assert!(s.snapshot().iter().all(|a| a.status == Status::Normal));
    }

    #[test]
    fn walled_in_adversaries_stay_put() {
        let g = grid_from(&[
            "###",
            "# #",
            "###",
        ]);
        let s = state_at(&[(1, 1)]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            s.move_all(&g, &mut rng);
            assert_eq!(s.snapshot()[0].pos, Position::new(1, 1));
        }
    }

    #[test]
    fn moves_are_single_steps() {
        let g = grid_from(&["     ", "     ", "     "]);
        let s = state_at(&[(1, 2)]);
        let mut rng = StdRng::seed_from_u64(42);
        let before = s.snapshot()[0].pos;
        s.move_all(&g, &mut rng);
        let after = s.snapshot()[0].pos;
        let dr = before.row.abs_diff(after.row);
        let dc = before.col.abs_diff(after.col);
        assert_eq!(dr + dc, 1);
    }

    #[test]
    fn snapshot_keeps_collection_order() {
        let s = state_at(&[(0, 0), (1, 1), (2, 2)]);
        let positions: Vec<Position> = s.snapshot().iter().map(|a| a.pos).collect();
        assert_eq!(positions, vec![Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)]);
    }

    #[test]
    fn spawn_is_kept_while_moving() {
        let g = grid_from(&["   "]);
        let s = state_at(&[(0, 1)]);
        let mut rng = StdRng::seed_from_u64(3);
        s.move_all(&g, &mut rng);
        assert_eq!(s.snapshot()[0].spawn, Position::new(0, 1));
        assert_eq!(s.len(), 1);
    }
}
