use std::fmt;

/// The number of sandwich types sold at the stall
///
/// Every record holds exactly one value per sandwich type.
pub const SANDWICH_COUNT: usize = 6;

/// The sandwich types, in worksheet column order
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sandwich {
    Bacon,
    Chicken,
    Tuna,
    Turkey,
    Ham,
    Egg,
}

impl Sandwich {
    /// All sandwich types, index `i` being the `i`-th column of every worksheet
    pub const ALL: [Sandwich; SANDWICH_COUNT] = [
        Sandwich::Bacon,
        Sandwich::Chicken,
        Sandwich::Tuna,
        Sandwich::Turkey,
        Sandwich::Ham,
        Sandwich::Egg,
    ];

    /// The header name of the sandwich type's column
    pub fn name(self) -> &'static str {
        match self {
            Sandwich::Bacon => "bacon",
            Sandwich::Chicken => "chicken",
            Sandwich::Tuna => "tuna",
            Sandwich::Turkey => "turkey",
            Sandwich::Ham => "ham",
            Sandwich::Egg => "egg",
        }
    }

    /// The header row every worksheet starts with
    pub fn header() -> Vec<String> {
        Self::ALL
            .iter()
            .map(|sandwich| sandwich.name().to_string())
            .collect()
    }
}

impl fmt::Display for Sandwich {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Possible errors to occur when reading a stored row back into a record
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("expected 6 values but the row holds {0}")]
    LengthMismatch(usize),
    #[error("'{value}' in the {sandwich} column is not a whole number")]
    Malformed { sandwich: Sandwich, value: String },
    #[error("the worksheet holds no data rows yet")]
    MissingData,
}

macro_rules! record {
    (
        $(#[$meta:meta])*
        $name:ident($ty:ty)
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name([$ty; SANDWICH_COUNT]);

        impl $name {
            /// Creates a record from one value per sandwich type
            pub fn new(values: [$ty; SANDWICH_COUNT]) -> Self {
                Self(values)
            }

            /// The values, in sandwich column order
            pub fn values(&self) -> &[$ty; SANDWICH_COUNT] {
                &self.0
            }

            /// The value recorded for a single sandwich type
            pub fn get(&self, sandwich: Sandwich) -> $ty {
                self.0[sandwich as usize]
            }

            /// Pairs each value with its sandwich type
            pub fn iter(&self) -> impl Iterator<Item = (Sandwich, $ty)> + '_ {
                Sandwich::ALL.into_iter().zip(self.0.iter().copied())
            }

            /// Formats the record as a worksheet row
            pub fn to_row(&self) -> Vec<String> {
                self.0.iter().map(ToString::to_string).collect()
            }
        }

        impl From<[$ty; SANDWICH_COUNT]> for $name {
            fn from(values: [$ty; SANDWICH_COUNT]) -> Self {
                Self(values)
            }
        }
    };
}

record!(
    /// The number of sandwiches sold per type at one market
    SalesRecord(u32)
);

record!(
    /// The number of sandwiches made per type for one market
    StockRecord(u32)
);

record!(
    /// Stock minus sales per type
    ///
    /// A positive value is wasted stock, a negative value is demand that could
    /// not be served.
    SurplusRecord(i64)
);

record!(
    /// The suggested number of sandwiches per type for the next market
    StockEstimate(u32)
);

impl SalesRecord {
    /// Reads a stored worksheet row as a sales record
    pub fn from_row(row: &[String]) -> Result<Self, RowError> {
        parse_row(row).map(Self)
    }
}

impl StockRecord {
    /// Reads a stored worksheet row as a stock record
    pub fn from_row(row: &[String]) -> Result<Self, RowError> {
        parse_row(row).map(Self)
    }
}

fn parse_row(row: &[String]) -> Result<[u32; SANDWICH_COUNT], RowError> {
    if row.len() != SANDWICH_COUNT {
        return Err(RowError::LengthMismatch(row.len()));
    }

    let mut values = [0; SANDWICH_COUNT];
    for ((value, cell), sandwich) in values.iter_mut().zip(row).zip(Sandwich::ALL) {
        *value = parse_cell(sandwich, cell)?;
    }

    Ok(values)
}

fn parse_cell(sandwich: Sandwich, cell: &str) -> Result<u32, RowError> {
    cell.trim()
        .parse()
        .map_err(|_| RowError::Malformed {
            sandwich,
            value: cell.to_string(),
        })
}
