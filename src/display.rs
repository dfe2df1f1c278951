use time::Date;

/// Full written weekday name, e.g. "Tuesday".
pub(crate) fn weekday_display(date: Date) -> String {
    date.weekday().to_string()
}

/// Day-of-month numeral with no leading zero, e.g. "12" or "3".
pub(crate) fn day_display(date: Date) -> String {
    date.day().to_string()
}
