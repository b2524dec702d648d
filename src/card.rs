//! Card types and label parsing.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseCardError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    /// Returns the single-letter label of the suit.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Hearts => 'H',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
            Self::Spades => 'S',
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            'H' | '♥' => Some(Self::Hearts),
            'D' | '♦' => Some(Self::Diamonds),
            'C' | '♣' => Some(Self::Clubs),
            'S' | '♠' => Some(Self::Spades),
            _ => None,
        }
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
    /// Ace.
    Ace,
}

impl Rank {
    /// All thirteen ranks, deuce first.
    pub const ALL: [Self; 13] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    /// Blackjack value of the rank, counting an ace as 11.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
            Self::Seven => 7,
            Self::Eight => 8,
            Self::Nine => 9,
            Self::Ten | Self::Jack | Self::Queen | Self::King => 10,
            Self::Ace => 11,
        }
    }

    /// Hi-Lo weight: +1 for 2-6, 0 for 7-9, -1 for tens and aces.
    #[must_use]
    pub const fn hi_lo(self) -> i32 {
        match self {
            Self::Two | Self::Three | Self::Four | Self::Five | Self::Six => 1,
            Self::Seven | Self::Eight | Self::Nine => 0,
            Self::Ten | Self::Jack | Self::Queen | Self::King | Self::Ace => -1,
        }
    }

    /// Returns whether the rank is worth ten.
    #[must_use]
    pub const fn is_ten(self) -> bool {
        matches!(self, Self::Ten | Self::Jack | Self::Queen | Self::King)
    }

    /// Returns the single-character label (`T` for ten).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            '2' => Some(Self::Two),
            '3' => Some(Self::Three),
            '4' => Some(Self::Four),
            '5' => Some(Self::Five),
            '6' => Some(Self::Six),
            '7' => Some(Self::Seven),
            '8' => Some(Self::Eight),
            '9' => Some(Self::Nine),
            'T' => Some(Self::Ten),
            'J' => Some(Self::Jack),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            'A' => Some(Self::Ace),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A playing card as reported by the detector.
///
/// The suit is optional: rank-only shoes ignore it, suited shoes require it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    /// The rank of the card.
    pub rank: Rank,
    /// The suit of the card, when known.
    pub suit: Option<Suit>,
}

impl Card {
    /// Creates a card with a known suit.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    /// Creates a card with no suit information.
    #[must_use]
    pub const fn rank_only(rank: Rank) -> Self {
        Self { rank, suit: None }
    }

    /// Blackjack value of the card (ace = 11).
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Parses a detector label such as `"AS"`, `"10d"`, `"K♠"` or `"7"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the label is empty or carries an unknown rank or
    /// suit.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::{Card, Rank, Suit};
    ///
    /// assert_eq!(Card::parse("10d").unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
    /// assert_eq!(Card::parse("a").unwrap(), Card::rank_only(Rank::Ace));
    /// ```
    pub fn parse(label: &str) -> Result<Self, ParseCardError> {
        label.parse()
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        if label.is_empty() {
            return Err(ParseCardError::Empty);
        }

        let (rank, rest) = if let Some(rest) = label.strip_prefix("10") {
            (Rank::Ten, rest)
        } else {
            let mut chars = label.chars();
            let first = chars.next().ok_or(ParseCardError::Empty)?;
            let rank = Rank::from_char(first.to_ascii_uppercase())
                .ok_or(ParseCardError::UnknownRank)?;
            (rank, chars.as_str())
        };

        let mut chars = rest.trim().chars();
        let suit = match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(
                Suit::from_char(c.to_ascii_uppercase()).ok_or(ParseCardError::UnknownSuit)?,
            ),
            (Some(_), Some(_)) => return Err(ParseCardError::UnknownSuit),
        };

        Ok(Self { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank.letter(), suit.letter()),
            None => write!(f, "{}", self.rank.letter()),
        }
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
