//! Text rendering of the greedy policy as hard and soft strategy tables

use std::fmt;

use crate::{
    blackjack::{Action, SOFT_OFFSET, StateIndex},
    learning::ValueStore,
};

/// Column header, one column per dealer upcard 2..=11.
pub const HEADER: &str = "2 3 4 5 6 7 8 9 T A";

const UPCARDS: std::ops::RangeInclusive<usize> = 2..=11;
const HARD_TOTALS: std::ops::RangeInclusive<usize> = 2..=21;
const SOFT_TOTALS: std::ops::RangeInclusive<usize> = 12..=21;

/// One player bucket with the greedy action for every upcard.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRow {
    pub player: usize,
    pub actions: Vec<Action>,
}

impl PolicyRow {
    /// Row label: the hard total, or `A+k` for a soft total of `11 + k`.
    pub fn label(&self) -> String {
        if self.player >= SOFT_OFFSET {
            format!("A+{}", self.player - SOFT_OFFSET - 11)
        } else {
            self.player.to_string()
        }
    }
}

/// Greedy policy in the layout of a basic-strategy chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTable {
    hard: Vec<PolicyRow>,
    soft: Vec<PolicyRow>,
    highlight: Option<StateIndex>,
}

impl PolicyTable {
    /// Each cell holds the first action of maximal policy probability.
    pub fn from_store(store: &ValueStore) -> Self {
        let row = |player: usize| PolicyRow {
            player,
            actions: UPCARDS
                .map(|dealer| store.best_action(StateIndex::new(player, dealer)))
                .collect(),
        };
        Self {
            hard: HARD_TOTALS.map(&row).collect(),
            soft: SOFT_TOTALS.map(|total| row(total + SOFT_OFFSET)).collect(),
            highlight: None,
        }
    }

    /// Mark the cell of `state` with `*`.
    pub fn with_highlight(mut self, state: StateIndex) -> Self {
        self.highlight = Some(state);
        self
    }

    pub fn hard(&self) -> &[PolicyRow] {
        &self.hard
    }

    pub fn soft(&self) -> &[PolicyRow] {
        &self.soft
    }

    /// Greedy action for a state covered by the table.
    pub fn action(&self, state: StateIndex) -> Option<Action> {
        let column = state.dealer.checked_sub(*UPCARDS.start())?;
        self.hard
            .iter()
            .chain(&self.soft)
            .find(|row| row.player == state.player)
            .and_then(|row| row.actions.get(column).copied())
    }

    fn write_block(&self, f: &mut fmt::Formatter<'_>, title: &str, rows: &[PolicyRow]) -> fmt::Result {
        writeln!(f, "{title}")?;
        writeln!(f, "{:>5} {HEADER}", "")?;
        for row in rows {
            let mut line = format!("{:>5} ", row.label());
            for (dealer, action) in UPCARDS.zip(&row.actions) {
                let marked = self.highlight == Some(StateIndex::new(row.player, dealer));
                line.push(action.letter());
                line.push(if marked { '*' } else { ' ' });
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl fmt::Display for PolicyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_block(f, "Hard totals", &self.hard)?;
        writeln!(f)?;
        self.write_block(f, "Soft totals", &self.soft)
    }
}
