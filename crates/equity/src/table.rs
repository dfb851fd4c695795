// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A validated hand snapshot, the players hole cards and the board.
use showdown_cards::{Card, Deck, parse_cards};
use showdown_eval::{HandRank, HandValue};

use crate::EquityError;

/// The players hole cards, the board, and the cards left in the deck.
///
/// A table is always valid: it has 2 to 9 players with 2 hole cards each, a
/// board with 0, 3, 4, or 5 cards, and no card is dealt twice.
#[derive(Debug, Clone)]
pub struct Table {
    players: Vec<[Card; 2]>,
    board: Vec<Card>,
    deck: Deck,
    dealt: u64,
}

impl Table {
    /// Minimum number of players.
    pub const MIN_PLAYERS: usize = 2;

    /// Maximum number of players.
    pub const MAX_PLAYERS: usize = 9;

    /// Number of cards on a complete board.
    pub const BOARD_SIZE: usize = 5;

    /// Creates a table checking the players and board cards.
    pub fn new(players: Vec<Vec<Card>>, board: Vec<Card>) -> Result<Self, EquityError> {
        if !(Self::MIN_PLAYERS..=Self::MAX_PLAYERS).contains(&players.len()) {
            return Err(EquityError::InvalidPlayerCount(players.len()));
        }

        let players = players
            .into_iter()
            .enumerate()
            .map(|(player, cards)| {
                <[Card; 2]>::try_from(cards.as_slice()).map_err(|_| {
                    EquityError::InvalidHoleCardCount {
                        player,
                        count: cards.len(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !matches!(board.len(), 0 | 3 | 4 | 5) {
            return Err(EquityError::InvalidBoardLength(board.len()));
        }

        let mut dealt = 0u64;
        for &card in players.iter().flatten().chain(board.iter()) {
            if dealt & card.mask() != 0 {
                return Err(EquityError::DuplicateCard(card));
            }

            dealt |= card.mask();
        }

        let mut deck = Deck::default();
        for card in Deck::default() {
            if dealt & card.mask() != 0 {
                deck.remove(card);
            }
        }

        Ok(Self {
            players,
            board,
            deck,
            dealt,
        })
    }

    /// Parses and checks players hole cards and board strings like `"AsKd"`.
    ///
    /// Card format errors are reported before any other error.
    pub fn parse<S: AsRef<str>>(players: &[S], board: &str) -> Result<Self, EquityError> {
        let players = players
            .iter()
            .map(|p| parse_cards(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let board = parse_cards(board)?;

        Self::new(players, board)
    }

    /// The players hole cards.
    pub fn players(&self) -> &[[Card; 2]] {
        &self.players
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The cards that are not dealt to a player or to the board.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mask of the dealt cards.
    pub fn dealt(&self) -> u64 {
        self.dealt
    }

    /// Number of board cards left to deal.
    pub fn missing(&self) -> usize {
        Self::BOARD_SIZE - self.board.len()
    }

    /// The current made hand of a player, from the flop on.
    pub fn made_hand(&self, player: usize) -> Option<HandRank> {
        if self.board.len() < 3 {
            return None;
        }

        let cards = self.players[player]
            .iter()
            .chain(self.board.iter())
            .copied()
            .collect::<Vec<_>>();
        Some(HandValue::eval(&cards).rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_cards::{Rank, Suit};

    #[test]
    fn remaining_deck() {
        let table = Table::parse(&["AsAh", "KsKh"], "2c7dTh").unwrap();
        assert_eq!(table.deck().count(), 52 - 7);
        assert_eq!(table.missing(), 2);
        assert_eq!(table.dealt().count_ones(), 7);

        for card in table.deck().cards() {
            assert_eq!(table.dealt() & card.mask(), 0);
        }

        let table = Table::parse(&["AsAh", "KsKh", "QdQc"], "").unwrap();
        assert_eq!(table.deck().count(), 46);
        assert_eq!(table.missing(), 5);
        assert_eq!(table.players()[2][0], Card::new(Rank::Queen, Suit::Diamonds));
    }

    #[test]
    fn duplicate_cards() {
        let err = Table::parse(&["Ah Ad", "Ah Ks"], "").unwrap_err();
        assert_eq!(
            err,
            EquityError::DuplicateCard(Card::new(Rank::Ace, Suit::Hearts))
        );

        let err = Table::parse(&["AhAd", "KhKs"], "2c3c2c").unwrap_err();
        assert!(matches!(err, EquityError::DuplicateCard(_)));

        let err = Table::parse(&["AhAd", "KhKs"], "Ad3c4c").unwrap_err();
        assert!(matches!(err, EquityError::DuplicateCard(_)));

        let err = Table::parse(&["AhAh", "KhKs"], "").unwrap_err();
        assert!(matches!(err, EquityError::DuplicateCard(_)));
    }

    #[test]
    fn player_count() {
        let err = Table::parse(&["AhAd"], "").unwrap_err();
        assert_eq!(err, EquityError::InvalidPlayerCount(1));

        let players = [
            "2c2d", "3c3d", "4c4d", "5c5d", "6c6d", "7c7d", "8c8d", "9c9d", "TcTd", "JcJd",
        ];
        let err = Table::parse(&players, "").unwrap_err();
        assert_eq!(err, EquityError::InvalidPlayerCount(10));

        assert!(Table::parse(&players[..9], "").is_ok());
        assert!(Table::parse::<&str>(&[], "").is_err());
    }

    #[test]
    fn hole_cards_count() {
        let err = Table::parse(&["AhAd", "KhKsQs"], "").unwrap_err();
        assert_eq!(
            err,
            EquityError::InvalidHoleCardCount {
                player: 1,
                count: 3
            }
        );

        let err = Table::parse(&["Ah", "KhKs"], "").unwrap_err();
        assert_eq!(
            err,
            EquityError::InvalidHoleCardCount {
                player: 0,
                count: 1
            }
        );
    }

    #[test]
    fn board_length() {
        for board in ["2c", "2c3c", "2c3c4c5c6c7c"] {
            let err = Table::parse(&["AhAd", "KhKs"], board).unwrap_err();
            assert!(matches!(err, EquityError::InvalidBoardLength(_)), "{board}");
        }

        for board in ["", "2c3c4c", "2c3c4c5c", "2c3c4c5c6c"] {
            assert!(Table::parse(&["AhAd", "KhKs"], board).is_ok(), "{board}");
        }
    }

    #[test]
    fn card_format() {
        for (players, board) in [(["AhAd", "KhKx"], ""), (["AhAd", "KhKs"], "2c3c4"), (["1hAd", "KhKs"], "")] {
            let err = Table::parse(&players, board).unwrap_err();
            assert!(matches!(err, EquityError::InvalidCardFormat(_)));
            assert!(err.is_validation());
        }
    }

    #[test]
    fn card_format_checked_first() {
        let err = Table::parse(&["AhAx"], "").unwrap_err();
        assert!(matches!(err, EquityError::InvalidCardFormat(_)));

        let err = Table::parse(&["AhAd", "KhKs"], "2c3cZz").unwrap_err();
        assert!(matches!(err, EquityError::InvalidCardFormat(_)));

        let err = Table::parse(&["AhAd"], "2c3c").unwrap_err();
        assert_eq!(err, EquityError::InvalidPlayerCount(1));
    }

    #[test]
    fn made_hands() {
        let table = Table::parse(&["AsAh", "KsQs"], "Ad7s2s").unwrap();
        assert_eq!(table.made_hand(0), Some(HandRank::ThreeOfAKind));
        assert_eq!(table.made_hand(1), Some(HandRank::HighCard));

        let table = Table::parse(&["AsAh", "KsQs"], "").unwrap();
        assert_eq!(table.made_hand(0), None);
    }
}
