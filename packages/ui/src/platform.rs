//! Small platform seams that differ between wasm and native builds.

use chrono::NaiveDate;

/// Sleep without blocking the UI thread.
#[cfg(target_arch = "wasm32")]
pub(crate) async fn sleep_ms(ms: u64) {
    gloo_timers::future::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Today in the user's local timezone.
#[cfg(target_arch = "wasm32")]
pub fn today() -> NaiveDate {
    let date = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        date.get_full_year() as i32,
        date.get_month() + 1,
        date.get_date(),
    )
    .unwrap_or(NaiveDate::MIN)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
