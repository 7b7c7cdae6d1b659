mod extractor;
mod finder;
mod prober;

pub use extractor::ItemExtractor;
pub use finder::{FallbackFinder, SelectorFinder};
pub use prober::{ClassCount, ProbeReport, StructuralProber};

use std::fmt;

/// One listing that passed keyword and price filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub id: String,
    pub title: String,
    pub price: u64,
    pub link: String,
    pub full_text: String,
}

impl fmt::Display for ExtractedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Id        : {}", self.id)?;
        writeln!(f, "Title     : {}", self.title)?;
        writeln!(f, "Price     : {} руб.", self.price)?;
        writeln!(f, "Link      : {}", self.link)?;
        writeln!(f, "Full text : {}", self.full_text)
    }
}
