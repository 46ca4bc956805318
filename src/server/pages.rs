//! Minimal server-rendered pages. Markup stays unstyled on purpose; the data
//! contracts (form fields, query parameters) are the interface that matters.

use std::fmt::Write;

use super::flash::Flash;
use crate::booking::availability::{RoomAvailability, RoomStatus};

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn flash_block(flashes: &[Flash]) -> String {
    let mut out = String::new();
    for flash in flashes {
        let _ = writeln!(
            out,
            "<p class=\"flash {}\">{}</p>",
            flash.level.as_str(),
            escape(&flash.message)
        );
    }
    out
}

pub fn login(flashes: &[Flash], next: Option<&str>) -> String {
    let action = match next {
        Some(next) => format!("/login?next={}", urlencoding::encode(next)),
        None => "/login".to_string(),
    };

    let mut body = flash_block(flashes);
    let _ = write!(
        body,
        "<h1>Log in</h1>\n\
         <form method=\"post\" action=\"{action}\">\n\
         <label>Username <input type=\"text\" name=\"username\" required></label>\n\
         <label>Password <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n"
    );

    page("Log in", &body)
}

pub fn availability(
    username: &str,
    date_str: &str,
    grid: &[RoomAvailability],
    flashes: &[Flash],
) -> String {
    let mut body = flash_block(flashes);

    let _ = write!(
        body,
        "<p>Logged in as {} — <a href=\"/logout\">Log out</a></p>\n\
         <h1>Availability for {}</h1>\n\
         <form method=\"get\" action=\"/availability\">\n\
         <label>Date <input type=\"text\" name=\"date\" value=\"{}\" placeholder=\"DD-MM-YYYY\"></label>\n\
         <button type=\"submit\">Show</button>\n\
         </form>\n\
         <table>\n<tr><th>Room</th><th>Status</th><th></th></tr>\n",
        escape(username),
        escape(date_str),
        escape(date_str),
    );

    for entry in grid {
        let _ = write!(body, "<tr><td>{}</td>", escape(&entry.room.name));
        match &entry.status {
            RoomStatus::Free => {
                let _ = write!(
                    body,
                    "<td>Free</td><td>\n\
                     <form method=\"post\" action=\"/availability\">\n\
                     <input type=\"hidden\" name=\"room_id\" value=\"{id}\">\n\
                     <input type=\"hidden\" name=\"action\" value=\"book\">\n\
                     <input type=\"hidden\" name=\"start_date\" value=\"{date}\">\n\
                     <label>Name <input type=\"text\" name=\"user_name\"></label>\n\
                     <label>Phone <input type=\"text\" name=\"user_number\"></label>\n\
                     <button type=\"submit\">Book</button>\n\
                     </form>\n</td>",
                    id = entry.room.id,
                    date = escape(date_str),
                );
            }
            RoomStatus::Booked(booking) => {
                let _ = write!(
                    body,
                    "<td>Booked by {} ({})</td><td>\n\
                     <form method=\"post\" action=\"/availability\">\n\
                     <input type=\"hidden\" name=\"room_id\" value=\"{id}\">\n\
                     <input type=\"hidden\" name=\"action\" value=\"cancel\">\n\
                     <input type=\"hidden\" name=\"start_date\" value=\"{date}\">\n\
                     <button type=\"submit\">Cancel</button>\n\
                     </form>\n</td>",
                    escape(&booking.user_name),
                    escape(&booking.user_number),
                    id = entry.room.id,
                    date = escape(date_str),
                );
            }
        }
        let _ = writeln!(body, "</tr>");
    }
    let _ = writeln!(body, "</table>");

    page("Availability", &body)
}

pub fn failure() -> String {
    page("Error", "<h1>Something went wrong</h1><p>Please try again later.</p>\n")
}
