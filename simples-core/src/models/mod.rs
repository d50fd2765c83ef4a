mod anexo_i;
mod bracket;
mod bracket_table;

pub use anexo_i::{ANEXO_I_ALIQ1, ANEXO_I_ALIQ2};
pub use bracket::{Aliq1Bracket, Aliq2Bracket, Bracket};
pub use bracket_table::{BracketMatch, BracketTable, BracketTableError};
