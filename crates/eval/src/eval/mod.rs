// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator computes the value of the best 5 cards hand out of 5, 6, or
//! 7 cards directly from the cards ranks counts and suits, without going
//! through the 5 cards subsets.
//!
//! It provides a [HandValue::eval] method that computes a hand value without
//! extracting the best hand out of a 7 cards hand, useful for computing odds
//! and other stats, and a slower [HandValue::eval_with_best_hand] that checks
//! every 5 cards subset and returns the five best cards, useful for showing
//! a winning hand.
//!
//! A [HandValue] is totally ordered, two values compare equal only when the
//! hands have the same category and the same tiebreak ranks, so equality is a
//! split pot.
use serde::{Deserialize, Serialize};
use std::fmt;

use showdown_cards::{Card, Rank};

/// The hand category, from the weakest to the strongest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HandRank {
    /// No matches.
    HighCard = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
}

impl HandRank {
    /// Returns all categories from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighCard,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
        ]
        .into_iter()
    }

    /// Number of ranks that break ties between hands of this category.
    fn tiebreak_len(self) -> usize {
        match self {
            HandRank::HighCard | HandRank::Flush => 5,
            HandRank::OnePair => 4,
            HandRank::TwoPair | HandRank::ThreeOfAKind => 3,
            HandRank::FullHouse | HandRank::FourOfAKind => 2,
            HandRank::Straight | HandRank::StraightFlush => 1,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{s}")
    }
}

/// The value of a poker hand.
///
/// The value is encoded in a u32 with the following format:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxxxxx|hhhhaaaa|bbbbcccc|ddddeeee|
///   +--------+--------+--------+--------+
///   h = hand category (high card=0,...,straight flush=8)
///   a..e = tiebreak ranks by decreasing significance (deuce=0,...,ace=12)
/// ```
///
/// unused tiebreak slots are zero, as the number of tiebreak ranks is fixed
/// for a category comparing two values compares category and then ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

/// Rank bits of a wheel straight, A-2-3-4-5.
const WHEEL: u16 = 0x100F;

impl HandValue {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval(cards: &[Card]) -> Self {
        assert!(
            (5..=7).contains(&cards.len()),
            "Invalid hand size {}",
            cards.len()
        );

        let mut counts = [0u8; 13];
        let mut suits = [0u16; 4];
        for c in cards {
            counts[c.rank_bits() as usize] += 1;
            suits[c.suit_bits() as usize] |= 1 << c.rank_bits();
        }

        // With at most 7 cards a flush leaves no room for quads or a full
        // house, so it only has to be checked against a straight flush.
        if let Some(flush) = suits.iter().copied().find(|s| s.count_ones() >= 5) {
            return match straight_high(flush) {
                Some(high) => Self::new(HandRank::StraightFlush, &[high]),
                None => Self::new(HandRank::Flush, &top_ranks(flush)),
            };
        }

        // Ranks groups sorted by count and then by rank, both descending.
        let mut groups = [(0u8, 0u8); 7];
        let mut len = 0;
        for rank in (0..13u8).rev() {
            let count = counts[rank as usize];
            if count > 0 {
                groups[len] = (count, rank);
                len += 1;
            }
        }

        let groups = &mut groups[..len];
        groups.sort_unstable_by(|a, b| b.cmp(a));

        let rank_at = |idx: usize| groups[idx].1;

        if groups[0].0 == 4 {
            let kicker = groups[1..].iter().map(|g| g.1).max().unwrap_or(0);
            return Self::new(HandRank::FourOfAKind, &[rank_at(0), kicker]);
        }

        if groups[0].0 == 3 && groups[1].0 >= 2 {
            return Self::new(HandRank::FullHouse, &[rank_at(0), rank_at(1)]);
        }

        let ranks_mask = suits.iter().fold(0, |acc, s| acc | s);
        if let Some(high) = straight_high(ranks_mask) {
            return Self::new(HandRank::Straight, &[high]);
        }

        match (groups[0].0, groups[1].0) {
            (3, _) => Self::new(HandRank::ThreeOfAKind, &[rank_at(0), rank_at(1), rank_at(2)]),
            (2, 2) => {
                // A third pair can play as the kicker.
                let kicker = groups[2..].iter().map(|g| g.1).max().unwrap_or(0);
                Self::new(HandRank::TwoPair, &[rank_at(0), rank_at(1), kicker])
            }
            (2, _) => Self::new(
                HandRank::OnePair,
                &[rank_at(0), rank_at(1), rank_at(2), rank_at(3)],
            ),
            _ => Self::new(HandRank::HighCard, &top_ranks(ranks_mask)),
        }
    }

    /// Evaluates a 5, 6, or 7 cards hand and returns the hand value and the
    /// best 5 cards.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval_with_best_hand(cards: &[Card]) -> (Self, [Card; 5]) {
        assert!(
            (5..=7).contains(&cards.len()),
            "Invalid hand size {}",
            cards.len()
        );

        let n = cards.len();
        let mut best_hand = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        let mut best_value = Self::eval(&best_hand);

        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                            let value = Self::eval(&hand);
                            if value > best_value {
                                best_value = value;
                                best_hand = hand;
                            }
                        }
                    }
                }
            }
        }

        (best_value, best_hand)
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        match self.0 >> 20 {
            0 => HandRank::HighCard,
            1 => HandRank::OnePair,
            2 => HandRank::TwoPair,
            3 => HandRank::ThreeOfAKind,
            4 => HandRank::Straight,
            5 => HandRank::Flush,
            6 => HandRank::FullHouse,
            7 => HandRank::FourOfAKind,
            8 => HandRank::StraightFlush,
            _ => panic!("Invalid hand value 0x{:x}", self.0),
        }
    }

    /// The ranks that break ties within the hand category, by decreasing
    /// significance.
    ///
    /// For a full house the trips rank comes before the pair rank, for two
    /// pair the high pair, the low pair, and the kicker. A straight reports
    /// only its high card, a five for the wheel.
    pub fn tiebreak(&self) -> Vec<Rank> {
        (0..self.rank().tiebreak_len())
            .filter_map(|idx| Rank::from_bits(((self.0 >> (16 - 4 * idx)) & 0xF) as u8))
            .collect()
    }

    /// The encoded value.
    pub fn value(&self) -> u32 {
        self.0
    }

    fn new(rank: HandRank, tiebreak: &[u8]) -> Self {
        let value = tiebreak
            .iter()
            .enumerate()
            .fold((rank as u32) << 20, |acc, (idx, &r)| {
                acc | (r as u32) << (16 - 4 * idx)
            });
        Self(value)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank())?;
        for rank in self.tiebreak() {
            write!(f, " {rank}")?;
        }

        Ok(())
    }
}

/// Returns the high card rank bits of the best straight in a ranks mask.
fn straight_high(mask: u16) -> Option<u8> {
    (4..13u8)
        .rev()
        .find(|high| {
            let straight = 0x1F << (high - 4);
            mask & straight == straight
        })
        .or_else(|| (mask & WHEEL == WHEEL).then_some(Rank::Five as u8))
}

/// Returns the five highest ranks bits in a ranks mask.
fn top_ranks(mask: u16) -> [u8; 5] {
    let mut out = [0u8; 5];
    let ranks = (0..13u8).rev().filter(|r| mask & (1 << r) != 0);
    for (slot, rank) in out.iter_mut().zip(ranks) {
        *slot = rank;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use showdown_cards::{Deck, parse_cards};
    use std::ops::ControlFlow;

    fn eval(s: &str) -> HandValue {
        HandValue::eval(&parse_cards(s).unwrap())
    }

    fn ranks(s: &str) -> Vec<Rank> {
        s.chars().filter_map(Rank::from_char).collect()
    }

    #[test]
    fn hand_categories() {
        let cases = [
            ("AsKsQsJsTs", HandRank::StraightFlush, "A"),
            ("9h9d9c9s2d", HandRank::FourOfAKind, "92"),
            ("KhKdKc3s3d", HandRank::FullHouse, "K3"),
            ("Ah9h7h4h2h", HandRank::Flush, "A9742"),
            ("9c8d7h6s5c", HandRank::Straight, "9"),
            ("QhQdQc7s2d", HandRank::ThreeOfAKind, "Q72"),
            ("JhJd4c4s9d", HandRank::TwoPair, "J49"),
            ("ThTd8c4s2d", HandRank::OnePair, "T842"),
            ("AhJd8c4s2d", HandRank::HighCard, "AJ842"),
        ];

        for (hand, rank, tiebreak) in cases {
            let value = eval(hand);
            assert_eq!(value.rank(), rank, "{hand}");
            assert_eq!(value.tiebreak(), ranks(tiebreak), "{hand}");
        }
    }

    #[test]
    fn category_ordering() {
        let sf = eval("5d6d7d8d9d");
        let quads = eval("AhAdAcAsKd");
        let full_house = eval("AhAdAcKsKd");
        let flush = eval("AhQhTh8h6h");
        let straight = eval("Ah2d3c4s5d");

        assert!(sf > quads);
        assert!(quads > full_house);
        assert!(full_house > flush);
        assert!(flush > straight);

        let values = HandRank::ranks()
            .map(|r| r as u32)
            .collect::<Vec<_>>();
        assert_eq!(values, (0..9).collect::<Vec<_>>());

        // The encoded value has the category above the tiebreak ranks.
        assert_eq!(sf.value() >> 20, HandRank::StraightFlush as u32);
        assert_eq!(full_house.value(), 0x6CB000);
        assert!(quads.value() > full_house.value());
    }

    #[test]
    fn wheel_straight() {
        let wheel = eval("Ah2d3c4s5d");
        let six_high = eval("2d3c4s5d6h");
        let best_high_card = eval("AhKdQcJs9d");
        let trips = eval("AhAdAc3s5d");

        assert_eq!(wheel.rank(), HandRank::Straight);
        assert_eq!(wheel.tiebreak(), vec![Rank::Five]);
        assert!(wheel < six_high);
        assert!(wheel > best_high_card);
        assert!(wheel > trips);

        let steel_wheel = eval("AhKd2h3h4h5h");
        assert_eq!(steel_wheel.rank(), HandRank::StraightFlush);
        assert!(steel_wheel < eval("2h3h4h5h6h"));

        // A broadway straight beats a wheel in the same 7 cards.
        let both = eval("Ah2d3c4s5dKhQd");
        assert_eq!(both.rank(), HandRank::Straight);
        assert_eq!(both.tiebreak(), vec![Rank::Five]);
        let broadway = eval("AhKdQcJsTd2c3c");
        assert_eq!(broadway.tiebreak(), vec![Rank::Ace]);
    }

    #[test]
    fn order_independent() {
        let cards = parse_cards("Kh7d7c2s2dAh9c").unwrap();
        let value = HandValue::eval(&cards);

        let mut rng = SmallRng::seed_from_u64(3);
        let mut shuffled = cards.clone();
        for _ in 0..20 {
            shuffled.shuffle(&mut rng);
            assert_eq!(HandValue::eval(&shuffled), value);
        }

        assert_eq!(eval("AsKsQsJsTs"), eval("TsJsQsKsAs"));
    }

    #[test]
    fn flush_tiebreaks() {
        // Flush compares flush cards only, off suit cards don't play.
        let a = eval("Ah9h7h4h2hKdKc");
        let b = eval("Ah9h7h4h3h2c2d");
        assert_eq!(a.rank(), HandRank::Flush);
        assert!(b > a);

        // Six flush cards play the best five.
        let six = eval("Ah9h7h4h3h2h5c");
        assert_eq!(six.tiebreak(), ranks("A9743"));
    }

    #[test]
    fn full_house_tiebreaks() {
        // Trips rank is compared before the pair rank.
        assert!(eval("3h3d3cAsAd") > eval("2h2d2cAsAd"));
        assert!(eval("3h3d3cAsAd") > eval("3h3d3cKsKd"));

        // Two trips play as a full house with the low trips as the pair.
        let two_trips = eval("3h3d3c9s9d9hAc");
        assert_eq!(two_trips.rank(), HandRank::FullHouse);
        assert_eq!(two_trips.tiebreak(), ranks("93"));

        // With trips and two pairs the best pair plays.
        let value = eval("3h3d3c9s9dTsTd");
        assert_eq!(value.tiebreak(), ranks("3T"));
    }

    #[test]
    fn two_pair_tiebreaks() {
        assert!(eval("AhAd2c2s3d") > eval("KhKdQcQs3d"));
        assert!(eval("JhJd4c4sAd") > eval("JhJd3c3sAd"));
        assert!(eval("JhJd4c4sAd") > eval("JhJd4c4sKd"));
        assert_eq!(eval("JhJd4c4sAd"), eval("JsJc4h4dAc"));

        // The third pair can be the kicker.
        let three_pairs = eval("JhJd4c4s9d9c2h");
        assert_eq!(three_pairs.tiebreak(), ranks("J94"));
        let kicker = eval("JhJd4c4s2d2cKh");
        assert_eq!(kicker.tiebreak(), ranks("J4K"));
    }

    #[test]
    fn quads_kicker() {
        // The kicker is the highest card left, even from a pair or trips.
        let value = eval("9h9d9c9sKdKc2h");
        assert_eq!(value.rank(), HandRank::FourOfAKind);
        assert_eq!(value.tiebreak(), ranks("9K"));

        let value = eval("9h9d9c9s3d3c3h");
        assert_eq!(value.tiebreak(), ranks("93"));
        assert!(eval("9h9d9c9sAd") > eval("9h9d9c9sKd"));
    }

    #[test]
    fn pair_and_high_card_kickers() {
        assert!(eval("ThTd8c4s3d") > eval("ThTd8c4s2d"));
        assert!(eval("AhJd8c4s3d") > eval("AhJd8c4s2d"));
        assert_eq!(eval("AhJd8c4s2dTc"), eval("AdJc8h4s2hTs"));
        assert_eq!(eval("AhJd8c5s2d4c3h").tiebreak(), vec![Rank::Five]);
    }

    #[test]
    fn best_hand_extraction() {
        let cards = parse_cards("2c7dAhKhQhJhTh").unwrap();
        let (value, best) = HandValue::eval_with_best_hand(&cards);
        assert_eq!(value.rank(), HandRank::StraightFlush);
        assert_eq!(value, HandValue::eval(&cards));

        let mut best = best.to_vec();
        best.sort_by_key(|c| c.rank());
        assert_eq!(best, parse_cards("ThJhQhKhAh").unwrap());
    }

    #[test]
    fn display() {
        assert_eq!(eval("KhKdKc3s3d").to_string(), "Full House K 3");
        assert_eq!(HandRank::ThreeOfAKind.to_string(), "Three of a Kind");
    }

    #[test]
    fn direct_eval_matches_best_subset() {
        let mut rng = SmallRng::seed_from_u64(11);
        for k in 5..=7 {
            Deck::default().sample(&mut rng, 20_000, k, |hand| {
                let (best, _) = HandValue::eval_with_best_hand(hand);
                assert_eq!(HandValue::eval(hand), best, "{hand:?}");
            });
        }
    }

    #[test]
    fn all_5cards_hands_categories() {
        let mut counts = [0u32; 9];
        Deck::default().for_each(5, |hand| {
            counts[HandValue::eval(hand).rank() as usize] += 1;
            ControlFlow::Continue(())
        });

        assert_eq!(
            counts,
            [1302540, 1098240, 123552, 54912, 10200, 5108, 3744, 624, 40]
        );
    }

    #[test]
    fn distinct_5cards_values() {
        // There are 7462 distinct 5 cards hand values.
        let mut values = ahash::HashSet::default();
        Deck::default().for_each(5, |hand| {
            values.insert(HandValue::eval(hand));
            ControlFlow::Continue(())
        });

        assert_eq!(values.len(), 7462);
    }

    // This takes a while to run in debug mode as it goes through 133M hands.
    #[test]
    #[ignore]
    fn all_7cards_hands_categories() {
        let mut counts = [0u32; 9];
        Deck::default().for_each(7, |hand| {
            counts[HandValue::eval(hand).rank() as usize] += 1;
            ControlFlow::Continue(())
        });

        assert_eq!(
            counts,
            [
                23294460, 58627800, 31433400, 6461620, 6180020, 4047644, 3473184, 224848, 41584
            ]
        );
    }
}
