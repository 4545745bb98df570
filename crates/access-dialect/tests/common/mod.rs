#![allow(dead_code)]

use access_dialect_core::mapping::{
    blob, clob, integer, numeric, timestamp, varchar, Mapping, Table, TableBuilder,
};

/// An event, attended by one or more guests. Keyed by an autonumber.
pub fn events() -> Table {
    TableBuilder::new()
        .name("EVENTS")
        .column(integer("EVENT_ID").build())
        .column(timestamp("EVENT DATE").build())
        .column(varchar("title", 100).build())
        .column(varchar("description", 255).unique().build())
        .column(clob("comments").build())
        .column(blob("logo").build())
        .column(numeric("fee", 19, 4).build())
        .identity_key("EVENT_ID")
        .index("IX_title", &["title"])
        .index("IX_date", &["EVENT DATE"])
        .build()
}

/// A guest, keyed by an application-assigned email address.
pub fn guest() -> Table {
    TableBuilder::new()
        .name("Guest")
        .column(varchar("email", 255).build())
        .column(varchar("name", 100).build())
        .column(varchar("title", 100).build())
        .primary_key(&["email"])
        .build()
}

/// Join table between events and guests.
pub fn events_guest() -> Table {
    TableBuilder::new()
        .name("EVENTS_Guest")
        .column(integer("EVENT_ID").not_null().build())
        .column(varchar("email", 255).not_null().build())
        .foreign_key(None, &["EVENT_ID"], "EVENTS", &["EVENT_ID"])
        .foreign_key(None, &["email"], "Guest", &[])
        .build()
}

pub fn mapping() -> Mapping {
    Mapping::new(vec![events(), guest(), events_guest()])
}
