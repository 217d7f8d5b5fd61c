use serde::Serialize;

/// A named phase of betting within one hand.
///
/// Flop games run `Blinds, Preflop, Flop, Turn, River`; stud games run
/// `Antes, Third, Fourth, Fifth, Sixth, Seventh`. Declaration order doubles
/// as chronological order within each family.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Blinds,
    Antes,
    Preflop,
    Third,
    Flop,
    Fourth,
    Turn,
    Fifth,
    River,
    Sixth,
    Seventh,
}

impl Segment {
    /// forced bets are logged here, never voluntary action
    pub const fn is_forced(&self) -> bool {
        matches!(self, Self::Blinds | Self::Antes)
    }
    /// segments that open with shared board cards
    pub const fn is_community(&self) -> bool {
        matches!(self, Self::Flop | Self::Turn | Self::River)
    }
    /// board cards expected when the segment opens
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Flop => 3,
            Self::Turn => 1,
            Self::River => 1,
            _ => 0,
        }
    }
}

impl TryFrom<&str> for Segment {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blinds" => Ok(Self::Blinds),
            "antes" => Ok(Self::Antes),
            "preflop" => Ok(Self::Preflop),
            "third" => Ok(Self::Third),
            "flop" => Ok(Self::Flop),
            "fourth" => Ok(Self::Fourth),
            "turn" => Ok(Self::Turn),
            "fifth" => Ok(Self::Fifth),
            "river" => Ok(Self::River),
            "sixth" => Ok(Self::Sixth),
            "seventh" => Ok(Self::Seventh),
            other => Err(format!("unknown segment: {}", other)),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Blinds => write!(f, "blinds"),
            Self::Antes => write!(f, "antes"),
            Self::Preflop => write!(f, "preflop"),
            Self::Third => write!(f, "third"),
            Self::Flop => write!(f, "flop"),
            Self::Fourth => write!(f, "fourth"),
            Self::Turn => write!(f, "turn"),
            Self::Fifth => write!(f, "fifth"),
            Self::River => write!(f, "river"),
            Self::Sixth => write!(f, "sixth"),
            Self::Seventh => write!(f, "seventh"),
        }
    }
}

/// Family of segments a game is played over.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Flop,
    Stud,
}

impl Variant {
    pub const fn segments(&self) -> &'static [Segment] {
        match self {
            Self::Flop => &[
                Segment::Blinds,
                Segment::Preflop,
                Segment::Flop,
                Segment::Turn,
                Segment::River,
            ],
            Self::Stud => &[
                Segment::Antes,
                Segment::Third,
                Segment::Fourth,
                Segment::Fifth,
                Segment::Sixth,
                Segment::Seventh,
            ],
        }
    }
    /// where blinds and antes are logged
    pub const fn forced(&self) -> Segment {
        match self {
            Self::Flop => Segment::Blinds,
            Self::Stud => Segment::Antes,
        }
    }
    /// first round of voluntary action; live blinds count toward it
    pub const fn opening(&self) -> Segment {
        match self {
            Self::Flop => Segment::Preflop,
            Self::Stud => Segment::Third,
        }
    }
    pub fn community(&self) -> impl Iterator<Item = Segment> {
        self.segments().iter().copied().filter(Segment::is_community)
    }
    pub fn contains(&self, segment: Segment) -> bool {
        self.segments().contains(&segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_chronological() {
        for variant in [Variant::Flop, Variant::Stud] {
            let segments = variant.segments();
            assert!(segments.windows(2).all(|w| w[0] < w[1]));
            assert!(segments[0] == variant.forced());
            assert!(segments[1] == variant.opening());
        }
    }

    #[test]
    fn community_only_in_flop_games() {
        assert_eq!(
            Variant::Flop.community().collect::<Vec<_>>(),
            vec![Segment::Flop, Segment::Turn, Segment::River]
        );
        assert_eq!(Variant::Stud.community().count(), 0);
    }

    #[test]
    fn bijective_str() {
        for segment in Variant::Flop.segments().iter().chain(Variant::Stud.segments()) {
            assert!(*segment == Segment::try_from(segment.to_string().as_str()).unwrap());
        }
    }
}
