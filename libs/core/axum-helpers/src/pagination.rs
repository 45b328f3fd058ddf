//! Offset pagination: `?page=&size=&sort=property[,asc|desc]`.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use thiserror::Error;
use validator::Validate;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Highest accepted page index; `MAX_PAGE * MAX_PAGE_SIZE` stays far below `i64::MAX`.
pub const MAX_PAGE: u64 = 1_000_000;

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("Unknown sort property '{0}'")]
    UnknownSortProperty(String),

    #[error("Invalid sort direction '{0}', expected 'asc' or 'desc'")]
    InvalidSortDirection(String),
}

impl From<PageError> for AppError {
    fn from(err: PageError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for sea_orm::Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => sea_orm::Order::Asc,
            SortDirection::Desc => sea_orm::Order::Desc,
        }
    }
}

/// Raw paging parameters as they arrive in the query string.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageRequest {
    /// Zero-based page index
    #[serde(default)]
    #[validate(range(max = 1_000_000))]
    pub page: u64,

    #[serde(default = "default_size")]
    #[validate(range(min = 1, max = 100))]
    pub size: u64,

    /// `property` or `property,asc|desc`
    #[serde(default)]
    pub sort: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageRequest {
    /// Parses `sort` into a typed property. An absent or empty `sort` uses
    /// `F::default()` ascending.
    pub fn resolve<F>(&self) -> Result<PageQuery<F>, PageError>
    where
        F: FromStr + Default,
    {
        let (field, direction) = match self.sort.as_deref().map(str::trim) {
            None | Some("") => (F::default(), SortDirection::Asc),
            Some(sort) => {
                let (property, direction) = match sort.split_once(',') {
                    Some((property, direction)) => (property.trim(), Some(direction.trim())),
                    None => (sort, None),
                };

                let field = property
                    .parse()
                    .map_err(|_| PageError::UnknownSortProperty(property.to_string()))?;
                let direction = match direction {
                    None | Some("") => SortDirection::Asc,
                    Some(direction) => direction
                        .parse()
                        .map_err(|_| PageError::InvalidSortDirection(direction.to_string()))?,
                };
                (field, direction)
            }
        };

        Ok(PageQuery {
            page: self.page,
            size: self.size,
            field,
            direction,
        })
    }
}

/// Validated paging parameters with a typed sort property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery<F> {
    pub page: u64,
    pub size: u64,
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Default> Default for PageQuery<F> {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            field: F::default(),
            direction: SortDirection::Asc,
        }
    }
}

impl<F> PageQuery<F> {
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
