pub mod coach;
pub mod growth;
pub mod progress;
pub mod store;
pub mod types;
pub mod wisdom;

/// Today's calendar date in the local timezone.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
