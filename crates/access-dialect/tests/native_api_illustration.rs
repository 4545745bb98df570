//! The event / guest walkthrough, as the SQL the Access dialect produces
//! for each step.

mod common;

use access_dialect::AccessDialect;
use access_dialect_core::builder::{
    col, func, Column, Delete, ExprBuilder, Insert, Select, SqlValue, Update,
};
use access_dialect_core::ddl::SchemaExporter;
use access_dialect_core::dialect::Quoter;
use access_dialect_core::limit::RowSelection;
use access_dialect_core::settings::{Hbm2Ddl, Settings};
use access_dialect_core::types::SqlType;
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn quoted_settings() -> Settings {
    Settings {
        globally_quoted_identifiers: true,
        hbm2ddl_auto: Hbm2Ddl::Create,
        ..Settings::default()
    }
}

#[test]
fn test_schema_creation() {
    let dialect = AccessDialect::new();
    let settings = quoted_settings();
    let statements = SchemaExporter::new(&dialect, &settings)
        .create_statements(&common::mapping())
        .unwrap();

    assert_eq!(
        statements,
        vec![
            "create table [EVENTS] ([EVENT_ID] COUNTER, [EVENT DATE] datetime, \
             [title] varchar(100), [description] varchar(255) UNIQUE, [comments] MEMO, \
             [logo] image, [fee] numeric(19,4), primary key ([EVENT_ID]))",
            "create table [Guest] ([email] varchar(255) not null, [name] varchar(100), \
             [title] varchar(100), primary key ([email]))",
            "create table [EVENTS_Guest] ([EVENT_ID] LONG not null, \
             [email] varchar(255) not null)",
            "create index [IX_title] on [EVENTS] ([title])",
            "create index [IX_date] on [EVENTS] ([EVENT DATE])",
            "alter table [EVENTS_Guest] add constraint [FK_EVENTS_Guest_EVENT_ID] \
             foreign key ([EVENT_ID]) references [EVENTS] ([EVENT_ID])",
            "alter table [EVENTS_Guest] add constraint [FK_EVENTS_Guest_email] \
             foreign key ([email]) references [Guest] ([email])",
        ]
    );
}

#[test]
fn test_schema_export_drops_first() {
    let dialect = AccessDialect::new();
    let settings = quoted_settings();
    let statements = SchemaExporter::new(&dialect, &settings)
        .export(&common::mapping())
        .unwrap();

    assert_eq!(statements.len(), 5 + 7);
    assert_eq!(
        &statements[..5],
        &[
            "alter table [EVENTS_Guest] drop constraint [FK_EVENTS_Guest_EVENT_ID]",
            "alter table [EVENTS_Guest] drop constraint [FK_EVENTS_Guest_email]",
            "drop table [EVENTS_Guest]",
            "drop table [Guest]",
            "drop table [EVENTS]",
        ]
    );
}

#[test]
fn test_quoting_only_where_needed() {
    let dialect = AccessDialect::new();
    let settings = Settings::default();
    let sql = SchemaExporter::new(&dialect, &settings)
        .create_table(&common::events())
        .unwrap();

    assert!(sql.starts_with("create table EVENTS (EVENT_ID COUNTER, [EVENT DATE] datetime,"));
}

#[test]
fn test_multi_column_unique_key_is_skipped() {
    let mut guest = common::guest();
    guest.unique_keys.push(access_dialect_core::mapping::UniqueKey {
        name: String::from("UK_guest_name"),
        columns: vec![String::from("name"), String::from("title")],
    });

    let dialect = AccessDialect::new();
    let settings = Settings::default();
    let exporter = SchemaExporter::new(&dialect, &settings);
    assert!(exporter.create_unique_keys(&guest).is_empty());
    assert!(!exporter.create_table(&guest).unwrap().contains("unique"));
}

#[test]
fn test_max_id_and_cleanup() {
    let (sql, _) = Select::new()
        .columns(&["max(EVENT_ID)"])
        .from("EVENTS")
        .build();
    assert_eq!(sql, "SELECT max(EVENT_ID) FROM EVENTS");

    assert_eq!(Delete::new().from("EVENTS_Guest").build().0, "DELETE FROM EVENTS_Guest");
    assert_eq!(Delete::new().from("EVENTS").build().0, "DELETE FROM EVENTS");
    assert_eq!(Delete::new().from("Guest").build().0, "DELETE FROM Guest");
}

#[test]
fn test_insert_reads_back_autonumber() {
    let dialect = AccessDialect::new();
    let quoter = Quoter::new(&dialect, false);
    let date_column = quoter.ident("EVENT DATE");
    let when = NaiveDate::from_ymd_opt(2017, 6, 1)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap();

    let insert = Insert::new()
        .into_table("EVENTS")
        .columns(&[date_column.as_str(), "title"])
        .values(vec![SqlValue::Timestamp(when), SqlValue::Text(String::from("event1"))])
        .build_returning_identity(&dialect, "EVENT_ID", SqlType::Integer)
        .unwrap();

    assert_eq!(insert.sql, "INSERT INTO EVENTS ([EVENT DATE], title) VALUES (?, ?)");
    assert_eq!(insert.identity_select.as_deref(), Some("SELECT @@IDENTITY"));
    assert_eq!(insert.params.len(), 2);
}

#[test]
fn test_update_with_date_and_concat() {
    let dialect = AccessDialect::new();
    let fee = Decimal::new(123_456, 4);

    let (sql, params) = Update::new()
        .table("EVENTS")
        .set_expr("[EVENT DATE]", func(&dialect, "current_date", vec![]).unwrap())
        .set_expr(
            "title",
            func(
                &dialect,
                "concat",
                vec![ExprBuilder::raw("'event'"), ExprBuilder::raw("'2'")],
            )
            .unwrap(),
        )
        .set("fee", fee)
        .where_clause(col("EVENT_ID").eq(2_i32))
        .build();

    assert_eq!(
        sql,
        "UPDATE EVENTS SET [EVENT DATE] = Date(), title = ('event'+'2'), fee = ? \
         WHERE EVENT_ID = ?"
    );
    assert_eq!(params, vec![SqlValue::Decimal(fee), SqlValue::Int(2)]);
}

#[test]
fn test_hour_of_event_date() {
    let dialect = AccessDialect::new();
    let quoter = Quoter::new(&dialect, false);
    let event_date = Column::quoted(&quoter, "EVENT DATE");
    let hour = func(&dialect, "hour", vec![event_date.into()]).unwrap();
    let (sql, params) = Select::new()
        .columns(&[hour.sql()])
        .from("EVENTS")
        .where_clause(col("EVENT_ID").eq(1_i32))
        .build();

    assert_eq!(sql, "SELECT Hour([EVENT DATE]) FROM EVENTS WHERE EVENT_ID = ?");
    assert_eq!(params.len(), 1);
}

#[test]
fn test_like_and_not_equal() {
    let (sql, params) = Select::new()
        .columns(&["title"])
        .from("EVENTS")
        .where_clause(col("title").like("event%"))
        .build();
    assert_eq!(sql, "SELECT title FROM EVENTS WHERE title LIKE ?");
    assert_eq!(params, vec![SqlValue::Text(String::from("event%"))]);

    let (sql, _) = Select::new()
        .columns(&["title"])
        .from("EVENTS")
        .where_clause(col("title").not_eq("event2"))
        .build();
    assert_eq!(sql, "SELECT title FROM EVENTS WHERE title != ?");
}

#[test]
fn test_coalesce() {
    let dialect = AccessDialect::new();
    let expr = func(
        &dialect,
        "coalesce",
        vec![col("description").into(), col("title").into()],
    )
    .unwrap();
    let (sql, _) = Select::new().columns(&[expr.sql()]).from("EVENTS").build();
    assert_eq!(sql, "SELECT coalesce(description, title) FROM EVENTS");
}

#[test]
fn test_ranged_query() {
    let dialect = AccessDialect::new();
    let paged = Select::new()
        .columns(&["title"])
        .from("EVENTS")
        .order_by(&["EVENT_ID"])
        .build_for(&dialect, &RowSelection::new().first_row(1).max_rows(1));

    assert_eq!(
        paged.sql,
        "SELECT title FROM EVENTS ORDER BY EVENT_ID limit 1 offset 1"
    );
    assert!(paged.params.is_empty());
    assert_eq!(paged.max_rows, None);
    assert_eq!(paged.skip_rows, 0);
}

#[test]
fn test_unranged_query_has_no_limit_clause() {
    let dialect = AccessDialect::new();
    let paged = Select::new()
        .columns(&["title"])
        .from("EVENTS")
        .build_for(&dialect, &RowSelection::new());
    assert_eq!(paged.sql, "SELECT title FROM EVENTS");
}

#[test]
fn test_count_distinct() {
    let (sql, _) = Select::new()
        .columns(&["count(distinct title)"])
        .from("EVENTS")
        .build();
    assert_eq!(sql, "SELECT count(distinct title) FROM EVENTS");
}

#[test]
fn test_in_list() {
    let (sql, params) = Select::new()
        .columns(&["name"])
        .from("Guest")
        .where_clause(col("email").in_list(vec!["gord@example.com", "joe@example.com"]))
        .build();

    assert_eq!(sql, "SELECT name FROM Guest WHERE email IN (?, ?)");
    assert_eq!(params.len(), 2);
}
