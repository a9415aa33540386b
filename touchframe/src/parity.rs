use std::{
    fmt::{Display, Formatter},
    ops::Mul,
};

/// The parity of a [`Row`](crate::Row); i.e. whether an even or an odd number of swaps are
/// needed to bring it back to rounds.  Generate these with [`Row::parity`](crate::Row::parity),
/// which is linear in the [`Stage`](crate::Stage) of the [`Row`](crate::Row).
#[derive(Eq, PartialEq, Hash, Debug, Copy, Clone)]
pub enum Parity {
    /// An **even** number of swaps are needed to return to rounds.  This is also often called
    /// _in course_ or _positive_.
    Even,
    /// An **odd** number of swaps are needed to return to rounds.  This is also often called
    /// _out of course_ or _negative_.
    Odd,
}

impl Parity {
    /// Maps `true` to [`Parity::Odd`] and `false` to [`Parity::Even`].
    #[inline(always)]
    pub fn from_is_odd(v: bool) -> Self {
        if v {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    /// Returns the `Parity` of a given number.
    #[inline(always)]
    pub fn from_number(v: usize) -> Parity {
        Self::from_is_odd(v % 2 != 0)
    }

    #[inline(always)]
    pub fn is_even(self) -> bool {
        self == Parity::Even
    }
}

impl Mul for Parity {
    type Output = Self;

    /// 'Multiply' two [`Parity`]s together, so that `r1.compose(r2).parity()` always equals
    /// `r1.parity() * r2.parity()`.
    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_is_odd(self != rhs)
    }
}

impl Display for Parity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Parity::Even => write!(f, "even"),
            Parity::Odd => write!(f, "odd"),
        }
    }
}
