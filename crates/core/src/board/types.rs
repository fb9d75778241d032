//! Normalized board model shared by the scanner and the threat calculator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Number of ranks and files on the board.
pub const BOARD_SIZE: u8 = 8;

/// Colour of a piece, taken from the first character of its code.
///
/// Pieces are labelled self/enemy purely by this prefix: `w` is "self",
/// `b` is "enemy", regardless of who is looking at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn initial(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }

    pub fn from_initial(c: char) -> Option<Self> {
        match c {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// Parses the colour class used by chessground boards (`white`, `black`).
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "white" => Some(Side::White),
            "black" => Some(Side::Black),
            _ => None,
        }
    }

    /// Rank direction pawns of this side attack towards.
    pub fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Pawn,
        Kind::Knight,
        Kind::Bishop,
        Kind::Rook,
        Kind::Queen,
        Kind::King,
    ];

    pub fn initial(self) -> char {
        match self {
            Kind::Pawn => 'p',
            Kind::Knight => 'n',
            Kind::Bishop => 'b',
            Kind::Rook => 'r',
            Kind::Queen => 'q',
            Kind::King => 'k',
        }
    }

    pub fn from_initial(c: char) -> Option<Self> {
        Kind::ALL.into_iter().find(|k| k.initial() == c)
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Kind::Pawn => "pawn",
            Kind::Knight => "knight",
            Kind::Bishop => "bishop",
            Kind::Rook => "rook",
            Kind::Queen => "queen",
            Kind::King => "king",
        }
    }

    /// Parses the role class used by chessground boards (`pawn`, `knight`, ...).
    pub fn from_class_name(name: &str) -> Option<Self> {
        Kind::ALL.into_iter().find(|k| k.class_name() == name)
    }

    pub fn is_slider(self) -> bool {
        matches!(self, Kind::Bishop | Kind::Rook | Kind::Queen)
    }
}

/// Two-character piece code such as `wp` or `bn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceCode {
    pub side: Side,
    pub kind: Kind,
}

impl PieceCode {
    pub fn new(side: Side, kind: Kind) -> Self {
        Self { side, kind }
    }
}

impl FromStr for PieceCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(k), None) => {
                let side = Side::from_initial(c);
                let kind = Kind::from_initial(k);
                side.zip(kind)
                    .map(|(side, kind)| PieceCode { side, kind })
                    .ok_or_else(|| Error::InvalidPieceCode(s.to_string()))
            }
            _ => Err(Error::InvalidPieceCode(s.to_string())),
        }
    }
}

impl TryFrom<String> for PieceCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<PieceCode> for String {
    fn from(code: PieceCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for PieceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.initial(), self.kind.initial())
    }
}

/// A board square in 1-based (row, col) coordinates.
///
/// Row 1 is white's back rank; col 1 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSquare")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

#[derive(Deserialize)]
struct RawSquare {
    row: i32,
    col: i32,
}

impl TryFrom<RawSquare> for Square {
    type Error = Error;

    fn try_from(raw: RawSquare) -> Result<Self> {
        Square::try_new(raw.row, raw.col)
    }
}

impl Square {
    /// Returns the square, or `None` when either coordinate is off the board.
    pub fn new(row: i32, col: i32) -> Option<Self> {
        let on_board = |v: i32| (1..=BOARD_SIZE as i32).contains(&v);
        if on_board(row) && on_board(col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn try_new(row: i32, col: i32) -> Result<Self> {
        Square::new(row, col).ok_or(Error::InvalidSquare { row, col })
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Square::new(self.row as i32 + d_row, self.col as i32 + d_col)
    }

    /// Zero-based index, a1 = 0, h8 = 63.
    pub fn index(self) -> usize {
        (self.row as usize - 1) * BOARD_SIZE as usize + (self.col as usize - 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col - 1) as char;
        write!(f, "{}{}", file, self.row)
    }
}

/// A single piece placement produced by a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PiecePosition {
    #[serde(rename = "type")]
    pub code: PieceCode,
    #[serde(flatten)]
    pub square: Square,
}

impl PiecePosition {
    pub fn new(code: PieceCode, square: Square) -> Self {
        Self { code, square }
    }

    /// Builds a placement from a code string and raw coordinates.
    pub fn parse(code: &str, row: i32, col: i32) -> Result<Self> {
        Ok(Self {
            code: code.parse()?,
            square: Square::try_new(row, col)?,
        })
    }

    pub fn side(&self) -> Side {
        self.code.side
    }

    pub fn kind(&self) -> Kind {
        self.code.kind
    }

    pub fn row(&self) -> u8 {
        self.square.row
    }

    pub fn col(&self) -> u8 {
        self.square.col
    }
}

/// Attacker counts for one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareThreat {
    #[serde(flatten)]
    pub square: Square,
    /// Attackers whose code starts with `w`.
    pub self_count: u32,
    /// Attackers whose code starts with `b`.
    pub enemy_count: u32,
}

impl SquareThreat {
    pub fn new(square: Square) -> Self {
        Self {
            square,
            self_count: 0,
            enemy_count: 0,
        }
    }

    pub fn record(&mut self, attacker: Side) {
        match attacker {
            Side::White => self.self_count += 1,
            Side::Black => self.enemy_count += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.self_count + self.enemy_count
    }

    /// Positive when white controls the square, negative when black does.
    pub fn balance(&self) -> i32 {
        self.self_count as i32 - self.enemy_count as i32
    }
}

/// Looks up the record for `square` in a sparse threat list.
pub fn threat_at(threats: &[SquareThreat], square: Square) -> Option<&SquareThreat> {
    threats.iter().find(|t| t.square == square)
}
