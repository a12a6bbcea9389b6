#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use kbl_dashboard::data_service::{DataService, ScoringCache, FIXTURES_RANGE, SCORING_RANGE};
use kbl_dashboard::sheet_rows::Grid;
use kbl_dashboard::sheets_client::{parse_values_response, SheetSource};

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

pub fn fixture_grid(name: &str) -> Grid {
    parse_values_response(&read_fixture(name)).expect("fixture should parse")
}

pub fn owner_labels() -> Vec<String> {
    [
        "Super Strikers (Alex)",
        "Night Owls (Priya)",
        "Boundary Hunters (Marco)",
        "Spin Doctors (Lena)",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// In-memory sheet keyed by range; ranges without an entry fail like a network error.
#[derive(Clone, Default)]
pub struct FakeSheet {
    ranges: Arc<Mutex<HashMap<String, Grid>>>,
    reads: Arc<AtomicUsize>,
}

impl FakeSheet {
    pub fn with_range(self, range: &str, grid: Grid) -> Self {
        self.set_range(range, grid);
        self
    }

    pub fn set_range(&self, range: &str, grid: Grid) {
        self.ranges.lock().unwrap().insert(range.to_string(), grid);
    }

    pub fn clear_range(&self, range: &str) {
        self.ranges.lock().unwrap().remove(range);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl SheetSource for FakeSheet {
    async fn read_range(&self, range: &str) -> Result<Grid> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.ranges
            .lock()
            .unwrap()
            .get(range)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("quota exceeded for {range}"))
    }
}

pub fn league_sheet() -> FakeSheet {
    FakeSheet::default()
        .with_range(SCORING_RANGE, fixture_grid("scoring_values.json"))
        .with_range(FIXTURES_RANGE, fixture_grid("fixtures_values.json"))
}

pub fn live_service(sheet: FakeSheet) -> DataService<FakeSheet> {
    DataService::new(sheet, owner_labels(), None)
}

pub fn cached_service(sheet: FakeSheet) -> DataService<FakeSheet> {
    DataService::new(
        sheet,
        owner_labels(),
        Some(Arc::new(ScoringCache::new("scoring"))),
    )
}
