use std::{fs::File, io::Cursor, path::Path, sync::Arc};

use ahash::AHashMap;
use anyhow::{bail, ensure, Context, Result};
use polars::{frame::DataFrame, io::SerReader, prelude::{CsvReadOptions, CsvReader, DataType, Field, Schema, SchemaRef}};

use super::code::RegionCode;

const CODE_COLUMN: &str = "FIPS";
const NAME_COLUMN: &str = "STATE_NAME";

/// One selectable entry: a region code and its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEntry {
    pub code: RegionCode,
    pub name: Arc<str>,
}

/// Ordered lookup of region codes to display names, in dropdown order.
#[derive(Debug, Clone, Default)]
pub struct RegionDirectory {
    entries: Vec<RegionEntry>,
    index: AHashMap<Arc<str>, usize>,
}

impl RegionDirectory {
    /// Build a directory from `(code, name)` pairs, keeping their order.
    pub fn from_pairs<C, N>(pairs: impl IntoIterator<Item = (C, N)>) -> Result<Self>
    where
        C: AsRef<str>,
        N: AsRef<str>,
    {
        let mut directory = Self::default();
        for (code, name) in pairs {
            directory.push(code.as_ref(), name.as_ref())?;
        }
        Ok(directory)
    }

    /// Read a directory CSV with `FIPS` and `STATE_NAME` columns.
    pub fn read_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("[RegionDirectory::read_csv] Failed to open CSV file: {}", path.display()))?;
        let df = CsvReader::new(file)
            .with_options(directory_csv_options())
            .finish()
            .with_context(|| format!("[RegionDirectory::read_csv] Failed to read CSV from {:?}", path))?;

        let directory = Self::from_frame(&df)
            .with_context(|| format!("[RegionDirectory::read_csv] Invalid region directory {}", path.display()))?;
        tracing::info!(entries = directory.len(), path = %path.display(), "loaded region directory");
        Ok(directory)
    }

    /// Read a directory from in-memory CSV text.
    pub fn read_csv_str(csv: &str) -> Result<Self> {
        let df = CsvReader::new(Cursor::new(csv.as_bytes()))
            .with_options(directory_csv_options())
            .finish()
            .context("[RegionDirectory::read_csv_str] Failed to read CSV from string")?;
        Self::from_frame(&df)
    }

    fn from_frame(df: &DataFrame) -> Result<Self> {
        let codes = df.column(CODE_COLUMN)
            .with_context(|| format!("missing column {CODE_COLUMN:?}"))?
            .cast(&DataType::String)?;
        let names = df.column(NAME_COLUMN)
            .with_context(|| format!("missing column {NAME_COLUMN:?}"))?
            .cast(&DataType::String)?;

        let mut directory = Self::default();
        for (row, (code, name)) in codes.str()?.into_iter().zip(names.str()?.into_iter()).enumerate() {
            let (Some(code), Some(name)) = (code, name) else {
                bail!("row {row} has an empty {CODE_COLUMN} or {NAME_COLUMN}");
            };
            directory.push(code.trim(), name.trim())?;
        }
        Ok(directory)
    }

    fn push(&mut self, code: &str, name: &str) -> Result<()> {
        let code = RegionCode::parse(code)?;
        let key: Arc<str> = Arc::from(code.as_str());
        ensure!(!self.index.contains_key(&key), "[RegionDirectory] Duplicate region code {key:?}");

        self.index.insert(key, self.entries.len());
        self.entries.push(RegionEntry { code, name: Arc::from(name) });
        Ok(())
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline] pub fn entries(&self) -> &[RegionEntry] { &self.entries }

    /// Look up the entry for a code string.
    pub fn get(&self, code: &str) -> Option<&RegionEntry> {
        self.index.get(code).map(|&i| &self.entries[i])
    }

    /// Display name for a code, if listed.
    pub fn name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|entry| &*entry.name)
    }
}

/// Force the code column to text so state FIPS codes keep their leading zeros.
fn directory_csv_options() -> CsvReadOptions {
    let schema: SchemaRef = Arc::new(Schema::from_iter([
        Field::new(CODE_COLUMN.into(), DataType::String),
        Field::new(NAME_COLUMN.into(), DataType::String),
    ]));
    CsvReadOptions::default()
        .with_has_header(true)
        .with_schema_overwrite(Some(schema))
}
