//! Dots-and-boxes implementation.
//!
//! Players take turns drawing lines between adjacent dots of a
//! `(width + 1) x (height + 1)` grid. Drawing the fourth side of a box
//! claims it and grants another move. When every line is drawn, the player
//! owning more boxes wins.
//!
//! Coordinates follow the box grid:
//! - horizontal line `(x, y)` is the top edge of box `(x, y)`, for
//!   `x < width`, `y <= height`
//! - vertical line `(x, y)` is the left edge of box `(x, y)`, for
//!   `x <= width`, `y < height`
//!
//! This is the game the tactical hooks were designed for: boxes are the
//! resolved scoring units and lines are claimed along an axis at a cell.

use std::fmt;
use uct_core::{Axis, Cell, GameState, Outcome, Player};

/// Dots-and-boxes player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Team {
    Red,
    Blue,
}

impl Player for Team {
    fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
        }
    }
}

/// A line, identified by its orientation and anchor cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Line {
    pub axis: Axis,
    pub cell: Cell,
}

impl Line {
    /// Horizontal line at `(x, y)`.
    pub fn horizontal(x: i32, y: i32) -> Self {
        Self {
            axis: Axis::Horizontal,
            cell: (x, y),
        }
    }

    /// Vertical line at `(x, y)`.
    pub fn vertical(x: i32, y: i32) -> Self {
        Self {
            axis: Axis::Vertical,
            cell: (x, y),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.axis {
            Axis::Horizontal => 'h',
            Axis::Vertical => 'v',
        };
        write!(f, "{}({}, {})", tag, self.cell.0, self.cell.1)
    }
}

/// Dots-and-boxes position.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct DotsAndBoxes {
    width: i32,
    height: i32,

    /// Horizontal line owners, indexed `y * width + x`.
    h_lines: Vec<Option<Team>>,

    /// Vertical line owners, indexed `y * (width + 1) + x`.
    v_lines: Vec<Option<Team>>,

    /// Box owners, indexed `y * width + x`.
    boxes: Vec<Option<Team>>,

    /// Player to move.
    current: Team,
}

impl DotsAndBoxes {
    /// Create an empty board of `width x height` boxes with red to move.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board must have at least one box");
        let (w, h) = (width as i32, height as i32);
        Self {
            width: w,
            height: h,
            h_lines: vec![None; width * (height + 1)],
            v_lines: vec![None; (width + 1) * height],
            boxes: vec![None; width * height],
            current: Team::Red,
        }
    }

    /// Board width in boxes.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Board height in boxes.
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Number of boxes owned by `team`.
    pub fn boxes_owned(&self, team: Team) -> usize {
        self.boxes.iter().filter(|b| **b == Some(team)).count()
    }

    /// Owner of box `(x, y)`, if claimed.
    pub fn box_owner(&self, x: i32, y: i32) -> Option<Team> {
        self.box_index(x, y).and_then(|i| self.boxes[i])
    }

    /// Owner of a line, if drawn. Lines off the board have no owner.
    pub fn line_owner(&self, line: Line) -> Option<Team> {
        self.line_index(line).and_then(|(axis, i)| match axis {
            Axis::Horizontal => self.h_lines[i],
            Axis::Vertical => self.v_lines[i],
        })
    }

    fn box_index(&self, x: i32, y: i32) -> Option<usize> {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    fn line_index(&self, line: Line) -> Option<(Axis, usize)> {
        let (x, y) = line.cell;
        match line.axis {
            Axis::Horizontal => ((0..self.width).contains(&x) && (0..=self.height).contains(&y))
                .then(|| (Axis::Horizontal, (y * self.width + x) as usize)),
            Axis::Vertical => ((0..=self.width).contains(&x) && (0..self.height).contains(&y))
                .then(|| (Axis::Vertical, (y * (self.width + 1) + x) as usize)),
        }
    }

    /// Boxes bordered by `line` (one or two).
    fn adjacent_boxes(&self, line: Line) -> Vec<(i32, i32)> {
        let (x, y) = line.cell;
        let candidates = match line.axis {
            Axis::Horizontal => [(x, y - 1), (x, y)],
            Axis::Vertical => [(x - 1, y), (x, y)],
        };
        candidates
            .into_iter()
            .filter(|&(bx, by)| self.box_index(bx, by).is_some())
            .collect()
    }

    fn box_is_closed(&self, x: i32, y: i32) -> bool {
        [
            Line::horizontal(x, y),
            Line::horizontal(x, y + 1),
            Line::vertical(x, y),
            Line::vertical(x + 1, y),
        ]
        .into_iter()
        .all(|side| self.line_owner(side).is_some())
    }
}

impl fmt::Display for DotsAndBoxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..=self.height {
            for x in 0..self.width {
                let edge = if self.line_owner(Line::horizontal(x, y)).is_some() {
                    "---"
                } else {
                    "   "
                };
                write!(f, "+{}", edge)?;
            }
            writeln!(f, "+")?;

            if y == self.height {
                break;
            }
            for x in 0..=self.width {
                let edge = if self.line_owner(Line::vertical(x, y)).is_some() {
                    '|'
                } else {
                    ' '
                };
                write!(f, "{}", edge)?;
                if x < self.width {
                    match self.box_owner(x, y) {
                        Some(Team::Red) => write!(f, " R ")?,
                        Some(Team::Blue) => write!(f, " B ")?,
                        None => write!(f, "   ")?,
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl GameState for DotsAndBoxes {
    type Move = Line;
    type Player = Team;

    fn player_turn(&self) -> Team {
        self.current
    }

    fn legal_moves(&self) -> Vec<Line> {
        let mut moves = Vec::new();
        for y in 0..=self.height {
            for x in 0..self.width {
                let line = Line::horizontal(x, y);
                if self.line_owner(line).is_none() {
                    moves.push(line);
                }
            }
        }
        for y in 0..self.height {
            for x in 0..=self.width {
                let line = Line::vertical(x, y);
                if self.line_owner(line).is_none() {
                    moves.push(line);
                }
            }
        }
        moves
    }

    /// Draw `mv` for the player to move. Drawing an illegal or already
    /// drawn line leaves the position unchanged.
    fn apply_move(&mut self, mv: Line) {
        let Some((axis, index)) = self.line_index(mv) else {
            return;
        };
        let slot = match axis {
            Axis::Horizontal => &mut self.h_lines[index],
            Axis::Vertical => &mut self.v_lines[index],
        };
        if slot.is_some() {
            return;
        }
        *slot = Some(self.current);

        let mut completed = false;
        for (bx, by) in self.adjacent_boxes(mv) {
            if self.box_is_closed(bx, by) {
                if let Some(i) = self.box_index(bx, by) {
                    self.boxes[i] = Some(self.current);
                    completed = true;
                }
            }
        }

        // Completing a box earns another move.
        if !completed {
            self.current = self.current.opponent();
        }
    }

    fn is_terminal(&self) -> bool {
        self.boxes.iter().all(|b| b.is_some())
    }

    fn outcome(&self) -> Option<Outcome<Team>> {
        if !self.is_terminal() {
            return None;
        }
        let red = self.boxes_owned(Team::Red);
        let blue = self.boxes_owned(Team::Blue);
        Some(match red.cmp(&blue) {
            std::cmp::Ordering::Greater => Outcome::Winner(Team::Red),
            std::cmp::Ordering::Less => Outcome::Winner(Team::Blue),
            std::cmp::Ordering::Equal => Outcome::Tie,
        })
    }

    fn score(&self, player: Team) -> f32 {
        self.boxes_owned(player) as f32
    }

    fn resolved_units(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_some()).count()
    }

    fn target_cell(&self, mv: Line) -> Option<Cell> {
        Some(mv.cell)
    }

    fn is_claimed(&self, cell: Cell, axis: Axis) -> bool {
        self.line_owner(Line { axis, cell }).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = DotsAndBoxes::new(2, 2);

        assert_eq!(state.player_turn(), Team::Red);
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), None);
        // 2 * 3 horizontal + 3 * 2 vertical
        assert_eq!(state.legal_moves().len(), 12);
        assert_eq!(state.resolved_units(), 0);
    }

    #[test]
    fn test_legal_moves_order() {
        let state = DotsAndBoxes::new(1, 1);
        assert_eq!(
            state.legal_moves(),
            vec![
                Line::horizontal(0, 0),
                Line::horizontal(0, 1),
                Line::vertical(0, 0),
                Line::vertical(1, 0),
            ]
        );
    }

    #[test]
    fn test_turn_passes_without_completion() {
        let mut state = DotsAndBoxes::new(2, 2);
        state.apply_move(Line::horizontal(0, 0));

        assert_eq!(state.player_turn(), Team::Blue);
        assert_eq!(state.line_owner(Line::horizontal(0, 0)), Some(Team::Red));
        assert!(!state.legal_moves().contains(&Line::horizontal(0, 0)));
    }

    #[test]
    fn test_completing_box_keeps_turn() {
        let mut state = DotsAndBoxes::new(2, 1);
        state.apply_move(Line::horizontal(0, 0)); // red
        state.apply_move(Line::horizontal(0, 1)); // blue
        state.apply_move(Line::vertical(0, 0)); // red
        assert_eq!(state.player_turn(), Team::Blue);

        state.apply_move(Line::vertical(1, 0)); // blue closes (0, 0)
        assert_eq!(state.box_owner(0, 0), Some(Team::Blue));
        assert_eq!(state.player_turn(), Team::Blue);
        assert_eq!(state.resolved_units(), 1);
        assert_eq!(state.score(Team::Blue), 1.0);
    }

    #[test]
    fn test_shared_line_closes_two_boxes() {
        let mut state = DotsAndBoxes::new(2, 1);
        for line in [
            Line::horizontal(0, 0),
            Line::horizontal(1, 0),
            Line::horizontal(0, 1),
            Line::horizontal(1, 1),
            Line::vertical(0, 0),
            Line::vertical(2, 0),
        ] {
            state.apply_move(line);
        }
        let mover = state.player_turn();
        state.apply_move(Line::vertical(1, 0));

        assert_eq!(state.boxes_owned(mover), 2);
        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(Outcome::Winner(mover)));
    }

    #[test]
    fn test_chain_of_completions() {
        let mut state = DotsAndBoxes::new(2, 1);
        state.apply_move(Line::horizontal(0, 0)); // red
        state.apply_move(Line::horizontal(0, 1)); // blue
        state.apply_move(Line::horizontal(1, 0)); // red
        state.apply_move(Line::horizontal(1, 1)); // blue
        state.apply_move(Line::vertical(0, 0)); // red
        state.apply_move(Line::vertical(1, 0)); // blue closes left, plays again
        assert_eq!(state.box_owner(0, 0), Some(Team::Blue));
        assert_eq!(state.player_turn(), Team::Blue);
        state.apply_move(Line::vertical(2, 0)); // blue closes right

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(Outcome::Winner(Team::Blue)));
    }

    #[test]
    fn test_tie() {
        let mut state = DotsAndBoxes::new(2, 1);
        state.apply_move(Line::horizontal(0, 0)); // red
        state.apply_move(Line::horizontal(0, 1)); // blue
        state.apply_move(Line::vertical(0, 0)); // red
        state.apply_move(Line::horizontal(1, 0)); // blue
        state.apply_move(Line::vertical(1, 0)); // red closes left, plays again
        state.apply_move(Line::horizontal(1, 1)); // red
        state.apply_move(Line::vertical(2, 0)); // blue closes right

        assert!(state.is_terminal());
        assert_eq!(state.boxes_owned(Team::Red), 1);
        assert_eq!(state.boxes_owned(Team::Blue), 1);
        assert_eq!(state.outcome(), Some(Outcome::Tie));
    }

    #[test]
    fn test_claimed_hooks() {
        let mut state = DotsAndBoxes::new(2, 2);
        state.apply_move(Line::vertical(2, 1));

        assert!(state.is_claimed((2, 1), Axis::Vertical));
        assert!(!state.is_claimed((2, 1), Axis::Horizontal));
        // Off-board coordinates are never claimed.
        assert!(!state.is_claimed((-1, 0), Axis::Vertical));
        assert!(!state.is_claimed((2, 0), Axis::Horizontal));
        assert_eq!(state.target_cell(Line::horizontal(1, 2)), Some((1, 2)));
    }

    #[test]
    fn test_redrawing_a_line_is_ignored() {
        let mut state = DotsAndBoxes::new(2, 2);
        state.apply_move(Line::horizontal(0, 0));
        let before = state.clone();
        state.apply_move(Line::horizontal(0, 0));
        state.apply_move(Line::horizontal(5, 5));
        assert_eq!(state, before);
    }

    #[test]
    fn test_random_games_terminate_with_all_boxes_owned() {
        let mut state = DotsAndBoxes::new(3, 2);
        let mut plies = 0;
        while !state.is_terminal() {
            let moves = state.legal_moves();
            state.apply_move(moves[plies % moves.len()]);
            plies += 1;
        }
        assert_eq!(plies, 3 * 3 + 4 * 2);
        assert_eq!(
            state.boxes_owned(Team::Red) + state.boxes_owned(Team::Blue),
            6
        );
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn test_display() {
        let mut state = DotsAndBoxes::new(1, 1);
        for line in state.legal_moves() {
            state.apply_move(line);
        }
        let display = format!("{}", state);
        assert!(display.contains("+---+"));
        assert!(display.contains("| B |"));
    }
}
