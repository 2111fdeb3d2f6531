//! The standard bullet table
//!
//! Every bullet an unordered list offers by default, with a semantic
//! category and the closest legacy HTML `list-style-type` for exports that
//! cannot use CSS. The table is small; lookups are linear scans.

use std::fmt::{self, Display, Formatter};

/// Semantic shape of a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FilledDisc,
    UnfilledDisc,
    FilledSquare,
    UnfilledSquare,
    FilledTriangle,
    UnfilledTriangle,
    FilledDiamond,
    UnfilledDiamond,
    Star,
    Hyphen,
    Asterisk,
    Checkmark,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Category::FilledDisc => "filled disc",
            Category::UnfilledDisc => "unfilled disc",
            Category::FilledSquare => "filled square",
            Category::UnfilledSquare => "unfilled square",
            Category::FilledTriangle => "filled triangle",
            Category::UnfilledTriangle => "unfilled triangle",
            Category::FilledDiamond => "filled diamond",
            Category::UnfilledDiamond => "unfilled diamond",
            Category::Star => "star",
            Category::Hyphen => "hyphen",
            Category::Asterisk => "asterisk",
            Category::Checkmark => "checkmark",
        })
    }
}

/// Best matching HTML 4 bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HtmlCategory {
    Disc,
    Circle,
    Square,
}

impl HtmlCategory {
    /// `<ul type>` / `list-style-type` keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            HtmlCategory::Disc => "disc",
            HtmlCategory::Circle => "circle",
            HtmlCategory::Square => "square",
        }
    }
}

impl Display for HtmlCategory {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One entry of the standard bullet table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardBullet {
    bullet: char,
    category: Category,
    html_category: HtmlCategory,
    description: &'static str,
}

impl StandardBullet {
    const fn new(
        bullet: char,
        category: Category,
        html_category: HtmlCategory,
        description: &'static str,
    ) -> Self {
        Self {
            bullet,
            category,
            html_category,
            description,
        }
    }

    pub fn bullet(&self) -> char {
        self.bullet
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn html_category(&self) -> HtmlCategory {
        self.html_category
    }

    pub fn description(&self) -> &'static str {
        self.description
    }
}

static STANDARD_BULLETS: [StandardBullet; 22] = [
    StandardBullet::new('\u{2022}', Category::FilledDisc, HtmlCategory::Disc, "bullet"),
    StandardBullet::new('\u{25E6}', Category::UnfilledDisc, HtmlCategory::Circle, "white bullet"),
    StandardBullet::new('\u{25AA}', Category::FilledSquare, HtmlCategory::Square, "black small square"),
    StandardBullet::new('\u{25AB}', Category::UnfilledSquare, HtmlCategory::Square, "white small square"),
    StandardBullet::new('\u{25A0}', Category::FilledSquare, HtmlCategory::Square, "black square"),
    StandardBullet::new('\u{25A1}', Category::UnfilledSquare, HtmlCategory::Square, "white square"),
    StandardBullet::new('\u{25B8}', Category::FilledTriangle, HtmlCategory::Disc, "black right-pointing small triangle"),
    StandardBullet::new('\u{25B9}', Category::UnfilledTriangle, HtmlCategory::Circle, "white right-pointing small triangle"),
    StandardBullet::new('\u{25B6}', Category::FilledTriangle, HtmlCategory::Disc, "black right-pointing triangle"),
    StandardBullet::new('\u{25B7}', Category::UnfilledTriangle, HtmlCategory::Circle, "white right-pointing triangle"),
    StandardBullet::new('\u{25C6}', Category::FilledDiamond, HtmlCategory::Disc, "black diamond"),
    StandardBullet::new('\u{25C7}', Category::UnfilledDiamond, HtmlCategory::Circle, "white diamond"),
    StandardBullet::new('\u{2666}', Category::FilledDiamond, HtmlCategory::Disc, "black diamond suit"),
    StandardBullet::new('\u{2605}', Category::Star, HtmlCategory::Disc, "black star"),
    StandardBullet::new('\u{2606}', Category::Star, HtmlCategory::Circle, "white star"),
    StandardBullet::new('\u{2013}', Category::Hyphen, HtmlCategory::Disc, "en dash"),
    StandardBullet::new('\u{2043}', Category::Hyphen, HtmlCategory::Disc, "hyphen bullet"),
    StandardBullet::new('-', Category::Hyphen, HtmlCategory::Disc, "hyphen-minus"),
    StandardBullet::new('*', Category::Asterisk, HtmlCategory::Disc, "asterisk"),
    StandardBullet::new('\u{2731}', Category::Asterisk, HtmlCategory::Disc, "heavy asterisk"),
    StandardBullet::new('\u{2713}', Category::Checkmark, HtmlCategory::Disc, "check mark"),
    StandardBullet::new('\u{2714}', Category::Checkmark, HtmlCategory::Disc, "heavy check mark"),
];

/// Every standard bullet, in menu order.
pub fn standard_bullets() -> &'static [StandardBullet] {
    &STANDARD_BULLETS
}

/// Table entry of a bullet string, if it is a standard bullet.
pub fn find(bullet: &str) -> Option<&'static StandardBullet> {
    let mut chars = bullet.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    STANDARD_BULLETS.iter().find(|entry| entry.bullet == first)
}

/// CSS string escape of a character: `\2022`.
pub fn css_escape(c: char) -> String {
    format!("\\{:04X}", u32::from(c))
}
