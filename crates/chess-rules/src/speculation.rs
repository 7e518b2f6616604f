//! Scoped speculative moves.

use crate::{RulesEngine, RulesError};
use chess_core::Move;
use std::ops::{Deref, DerefMut};

/// A move applied for exploration, reverted when the guard is dropped.
///
/// Tree searches walk the live position of the game. Wrapping each step in a
/// `Speculation` keeps apply and undo paired on every path out of the scope,
/// including early returns.
///
/// ```
/// use chess_rules::{RulesEngine, Speculation, StandardRules};
///
/// let mut rules = StandardRules::new();
/// let first = rules.legal_moves()[0].clone();
/// {
///     let inner = Speculation::new(&mut rules, &first).unwrap();
///     assert_eq!(inner.ply_count(), 1);
/// }
/// assert_eq!(rules.serialize(), StandardRules::STARTPOS);
/// ```
pub struct Speculation<'a, R: RulesEngine + ?Sized> {
    rules: &'a mut R,
}

impl<'a, R: RulesEngine + ?Sized> Speculation<'a, R> {
    /// Applies `m` and returns a guard that undoes it on drop.
    pub fn new(rules: &'a mut R, m: &Move) -> Result<Self, RulesError> {
        rules.apply_move(m)?;
        Ok(Speculation { rules })
    }
}

impl<R: RulesEngine + ?Sized> Deref for Speculation<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.rules
    }
}

impl<R: RulesEngine + ?Sized> DerefMut for Speculation<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.rules
    }
}

impl<R: RulesEngine + ?Sized> Drop for Speculation<'_, R> {
    fn drop(&mut self) {
        self.rules.undo();
    }
}
