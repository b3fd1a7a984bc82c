//! Cron scheduler adapter
//!
//! Runs each registered callback on a tokio task that sleeps until the next
//! upcoming time of its schedule, evaluated in the server's local time zone.
//! Every tick spawns the callback on its own task, so a slow callback does
//! not delay the following tick.
//!
//! Expressions use the seconds-first syntax of the `cron` crate. Classic
//! five-field crontab expressions (`min hour dom month dow`) are accepted as
//! well and translated: a `0` seconds field is prepended and numeric
//! weekdays (0 or 7 = Sunday) are shifted to the crate's 1 = Sunday numbering.

use std::str::FromStr;

use chrono::{DateTime, Local, TimeZone};
use cron::Schedule;

use crate::domain::ports::{RepeatingTask, TaskCallback, TaskHandle};
use crate::error::ScheduleError;

#[derive(Debug, Default, Clone, Copy)]
pub struct CronScheduler;

impl CronScheduler {
    pub fn new() -> Self {
        Self
    }
}

/// Parse a crontab or `cron`-crate expression
pub fn parse_schedule(expression: &str) -> Result<Schedule, ScheduleError> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    let normalized = match fields.as_slice() {
        [minute, hour, day, month, weekday] => format!(
            "0 {} {} {} {} {}",
            minute,
            hour,
            day,
            month,
            shift_weekdays(weekday)
        ),
        _ => fields.join(" "),
    };

    Schedule::from_str(&normalized).map_err(|e| ScheduleError::InvalidExpression {
        expression: expression.to_string(),
        reason: e.to_string(),
    })
}

/// Translate a crontab weekday field (0-7, Sunday = 0 or 7) to 1-7, Sunday = 1
fn shift_weekdays(field: &str) -> String {
    field
        .split(',')
        .map(shift_weekday_part)
        .collect::<Vec<_>>()
        .join(",")
}

fn shift_weekday_part(part: &str) -> String {
    let (range, step) = match part.split_once('/') {
        Some((range, step)) => (range, Some(step)),
        None => (part, None),
    };
    let with_step = |range: String| match step {
        Some(step) => format!("{}/{}", range, step),
        None => range,
    };

    // Out-of-range values are left as they are for the parser to reject.
    match range.split_once('-') {
        Some((start, end)) => match (crontab_weekday(start), crontab_weekday(end)) {
            (Some(0), Some(7)) => with_step("1-7".to_string()),
            (Some(7), Some(7)) => with_step("1".to_string()),
            // Ranges running into Sunday wrap to the start of the week.
            (Some(start), Some(7)) => format!("{},1", with_step(format!("{}-7", start + 1))),
            (Some(start), Some(end)) => with_step(format!("{}-{}", start + 1, end + 1)),
            _ => part.to_string(),
        },
        None => match crontab_weekday(range) {
            Some(day) => with_step(((day % 7) + 1).to_string()),
            None => part.to_string(),
        },
    }
}

fn crontab_weekday(value: &str) -> Option<u8> {
    value.parse::<u8>().ok().filter(|day| *day <= 7)
}

/// First tick strictly after both the previous tick and `now`
fn next_tick<Tz: TimeZone>(
    schedule: &Schedule,
    previous: &DateTime<Tz>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let from = if now > previous { now } else { previous };
    schedule.after(from).next()
}

impl RepeatingTask for CronScheduler {
    fn schedule(
        &self,
        expression: &str,
        callback: TaskCallback,
    ) -> Result<TaskHandle, ScheduleError> {
        let schedule = parse_schedule(expression)?;
        if schedule.upcoming(Local).next().is_none() {
            return Err(ScheduleError::NoUpcoming(expression.to_string()));
        }

        let expression = expression.to_string();
        let task = tokio::spawn(async move {
            let mut previous = Local::now();
            loop {
                let Some(next) = next_tick(&schedule, &previous, &Local::now()) else {
                    tracing::warn!(schedule = %expression, "Schedule has no upcoming runs, stopping");
                    break;
                };

                let wait = (next - Local::now()).to_std().unwrap_or_default();
                tracing::debug!(schedule = %expression, next = %next, "Waiting for next tick");
                tokio::time::sleep(wait).await;

                tokio::spawn(callback());
                previous = next;
            }
        });

        Ok(TaskHandle::new(move || task.abort()))
    }
}
