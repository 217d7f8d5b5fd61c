use crate::Chips;
use serde::Serialize;

/// How a room phrases the number printed next to "raises".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// the increment over the bet being faced
    By(Chips),
    /// the raiser's new total for the segment
    To(Chips),
    /// everything the raiser adds in this action, call included
    Total(Chips),
}

/// Canonical raise: what it cost to call, how much it raised by, and the
/// new bet everyone else must match.
///
/// Every constructor takes `bp`, the bet being faced, and `bc`, what the
/// raiser already committed in the segment. The three agree whenever they
/// describe the same raise, so `to - bc == call + by` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Raise {
    call: Chips,
    by: Chips,
    to: Chips,
}

impl Raise {
    pub fn by(bp: Chips, bc: Chips, amount: Chips) -> Self {
        Self {
            call: bp - bc,
            by: amount,
            to: bp + amount,
        }
    }
    pub fn to(bp: Chips, bc: Chips, amount: Chips) -> Self {
        Self {
            call: bp - bc,
            by: amount - bp,
            to: amount,
        }
    }
    pub fn total(bp: Chips, bc: Chips, amount: Chips) -> Self {
        let call = bp - bc;
        let by = amount - call;
        Self {
            call,
            by,
            to: bp + by,
        }
    }
    pub fn call(&self) -> Chips {
        self.call
    }
    pub fn raise_by(&self) -> Chips {
        self.by
    }
    pub fn raise_to(&self) -> Chips {
        self.to
    }
    /// chips moved from stack to pot by this action
    pub fn added(&self) -> Chips {
        self.call + self.by
    }
}

impl From<(Convention, Chips, Chips)> for Raise {
    fn from((convention, bp, bc): (Convention, Chips, Chips)) -> Self {
        match convention {
            Convention::By(amount) => Self::by(bp, bc, amount),
            Convention::To(amount) => Self::to(bp, bc, amount),
            Convention::Total(amount) => Self::total(bp, bc, amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn raise_by_over_big_blind() {
        let raise = Raise::by(dec!(1), dec!(0), dec!(2));
        assert_eq!(raise.call(), dec!(1));
        assert_eq!(raise.raise_by(), dec!(2));
        assert_eq!(raise.raise_to(), dec!(3));
        assert_eq!(raise.added(), dec!(3));
    }

    #[test]
    fn big_blind_raises_to() {
        let raise = Raise::to(dec!(3), dec!(1), dec!(9));
        assert_eq!(raise.call(), dec!(2));
        assert_eq!(raise.raise_by(), dec!(6));
        assert_eq!(raise.added(), dec!(8));
    }

    #[test]
    fn call_and_raise_total() {
        let raise = Raise::total(dec!(0.50), dec!(0.25), dec!(1.75));
        assert_eq!(raise.call(), dec!(0.25));
        assert_eq!(raise.raise_by(), dec!(1.50));
        assert_eq!(raise.raise_to(), dec!(2.00));
        assert_eq!(raise.added(), dec!(1.75));
    }

    #[test]
    fn conventions_agree() {
        let bp = dec!(4);
        let bc = dec!(1);
        let to = Raise::to(bp, bc, dec!(12));
        assert_eq!(to, Raise::by(bp, bc, dec!(8)));
        assert_eq!(to, Raise::total(bp, bc, dec!(11)));
        assert_eq!(to.raise_to() - bc, to.added());
    }
}
