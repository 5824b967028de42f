//! Filter composition for transaction queries.
//!
//! A [`TransactionFilter`] is a plain value: every listing and report starts
//! from the month window and narrows it with search, price band or sold flag.
//! Rendering it produces a fresh sea-orm [`Condition`] each time.

use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr},
};

use crate::entities::transactions;
use crate::services::month_range::MonthRange;

/// Half-open price interval `[min, max)`; `max == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceBand {
    #[cfg(test)]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

/// A normalized free-text search term.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    text: String,
    price: Option<f64>,
}

impl SearchTerm {
    /// Returns `None` for absent or blank input.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let text = raw.map(str::trim).filter(|term| !term.is_empty())?;
        let price = text.parse::<f64>().ok().filter(|price| price.is_finite());

        Some(Self {
            text: text.to_string(),
            price,
        })
    }

    /// The term as a price, when it is numeric.
    pub fn price(&self) -> Option<f64> {
        self.price
    }

    /// Lower-cased `LIKE` pattern matching the term as a literal substring.
    fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.text.len() + 2);
        pattern.push('%');
        for c in self.text.to_lowercase().chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    fn condition(&self) -> Condition {
        let pattern = self.like_pattern();
        let mut any = Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col(transactions::Column::Title)))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
            .add(
                Expr::expr(Func::lower(Expr::col(transactions::Column::Description)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );

        if let Some(price) = self.price {
            any = any.add(transactions::Column::Price.eq(price));
        }

        any
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    range: MonthRange,
    search: Option<SearchTerm>,
    price_band: Option<PriceBand>,
    sold: Option<bool>,
}

impl TransactionFilter {
    /// Records whose `dateOfSale` falls inside `range`, both ends inclusive.
    pub fn for_range(range: MonthRange) -> Self {
        Self {
            range,
            search: None,
            price_band: None,
            sold: None,
        }
    }

    /// Also match `title`/`description` substrings or exact price.
    ///
    /// Blank terms leave the filter unchanged.
    pub fn search(mut self, term: Option<&str>) -> Self {
        self.search = SearchTerm::parse(term);
        self
    }

    pub fn price_band(mut self, band: PriceBand) -> Self {
        self.price_band = Some(band);
        self
    }

    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    pub fn search_term(&self) -> Option<&SearchTerm> {
        self.search.as_ref()
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all()
            .add(transactions::Column::DateOfSale.gte(self.range.start))
            .add(transactions::Column::DateOfSale.lte(self.range.end));

        if let Some(search) = &self.search {
            condition = condition.add(search.condition());
        }

        if let Some(band) = &self.price_band {
            condition = condition.add(transactions::Column::Price.gte(band.min));
            if let Some(max) = band.max {
                condition = condition.add(transactions::Column::Price.lt(max));
            }
        }

        if let Some(sold) = self.sold {
            condition = condition.add(transactions::Column::Sold.eq(sold));
        }

        condition
    }
}
