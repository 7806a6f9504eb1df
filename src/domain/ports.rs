use crate::domain::model::EntryRecord;
use crate::utils::error::Result;
use chrono::NaiveDate;

/// 提供時間軸紀錄的來源 (檔案、表單狀態等)
pub trait EntrySource: Send + Sync {
    fn load_entries(&self) -> Result<Vec<EntryRecord>>;
}

impl EntrySource for Vec<EntryRecord> {
    fn load_entries(&self) -> Result<Vec<EntryRecord>> {
        Ok(self.clone())
    }
}

pub trait ConfigProvider: Send + Sync {
    fn required_years(&self) -> u32;
    fn degree_required(&self) -> bool;
    fn gap_visibility_percent(&self) -> f64;
    fn min_segment_width_percent(&self) -> f64;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
