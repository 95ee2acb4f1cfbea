use chrono::NaiveTime;

use super::types::{Day, HalfDayBlock, SlotIndex, TimeSlot};

/// Slot indices scanned when the mentor's day and half-day are already fixed
pub const FIXED_SLOTS_PER_BLOCK: u8 = 8;

/// Slot indices scanned when the solver picks the day and half-day itself.
/// Differs from `FIXED_SLOTS_PER_BLOCK` on purpose; both bounds stay configurable
/// until product decides whether a half-day holds 8 or 9 meetings.
pub const FREE_SLOTS_PER_BLOCK: u8 = 9;

/// Largest grid that keeps the AM window (9:00..11:40) clear of the PM one
pub const MAX_SLOTS_PER_BLOCK: u8 = 9;

pub const SLOT_MINUTES: u8 = 20;
const SLOTS_PER_HOUR: u8 = 60 / SLOT_MINUTES;

fn base_hour(block: HalfDayBlock) -> u8 {
    match block {
        HalfDayBlock::AM => 9,
        HalfDayBlock::PM => 12,
    }
}

/// Converts a (block, slot index) pair to wall-clock (hour, minute)
/// Slot 0 = 9:00 (AM) or 12:00 (PM), then every 20 minutes
pub fn slot_time(block: HalfDayBlock, index: SlotIndex) -> (u8, u8) {
    let hour = base_hour(block) + index / SLOTS_PER_HOUR;
    let minute = (index % SLOTS_PER_HOUR) * SLOT_MINUTES;
    (hour, minute)
}

/// Resolves a slot on a given day
pub fn time_slot(day: Day, block: HalfDayBlock, index: SlotIndex) -> TimeSlot {
    let (hour, minute) = slot_time(block, index);
    TimeSlot { day, hour, minute }
}

/// Inverse of `slot_time` for grids no wider than `MAX_SLOTS_PER_BLOCK`
#[cfg(test)]
pub fn decode_slot_time(hour: u8, minute: u8) -> Option<(HalfDayBlock, SlotIndex)> {
    if minute % SLOT_MINUTES != 0 || minute >= 60 {
        return None;
    }
    let block = match hour {
        9..=11 => HalfDayBlock::AM,
        12..=14 => HalfDayBlock::PM,
        _ => return None,
    };
    let index = (hour - base_hour(block)) * SLOTS_PER_HOUR + minute / SLOT_MINUTES;
    Some((block, index))
}

/// Wall-clock time of a slot as a chrono value
pub fn to_naive_time(slot: &TimeSlot) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(slot.hour as u32, slot.minute as u32, 0)
}

/// Formats a slot as "H:MM AM" / "H:MM PM" (12-hour clock, noon is PM)
pub fn format_time(slot: &TimeSlot) -> String {
    match to_naive_time(slot) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => format!("{}:{:02}", slot.hour, slot.minute),
    }
}

/// Short day label used in the exported sheet
pub fn format_day(day: Day) -> &'static str {
    match day {
        Day::Monday => "Mon",
        Day::Tuesday => "Tue",
        Day::Wednesday => "Wed",
        Day::Thursday => "Thur",
        Day::Friday => "Fri",
    }
}
