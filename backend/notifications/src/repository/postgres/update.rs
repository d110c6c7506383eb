//! Sparse UPDATE statement for a single notification row.
//!
//! Only the columns present in a [`NotificationPatch`] are assigned. Columns
//! are always visited in the order `type_message`, `message`, `task_title`,
//! placeholders are numbered from `$1` without gaps and the row id is bound
//! last.

use crate::domain::notification::NotificationPatch;

use super::NOTIFICATION_COLUMNS;

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateArg {
    Int(i32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub args: Vec<UpdateArg>,
}

/// Returns `None` when the patch sets no column, so an `UPDATE` with an empty
/// `SET` list is never issued.
pub fn build_update(id: i32, patch: &NotificationPatch) -> Option<UpdateStatement> {
    let mut columns: Vec<&'static str> = Vec::with_capacity(3);
    let mut args: Vec<UpdateArg> = Vec::with_capacity(4);

    if let Some(type_message) = patch.type_message {
        columns.push("type_message");
        args.push(UpdateArg::Int(type_message));
    }
    if let Some(message) = &patch.message {
        columns.push("message");
        args.push(UpdateArg::Text(message.clone()));
    }
    if let Some(task_title) = &patch.task_title {
        columns.push("task_title");
        args.push(UpdateArg::Text(task_title.clone()));
    }

    if columns.is_empty() {
        return None;
    }

    let assignments = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "UPDATE notifications SET {} WHERE id = ${} RETURNING {}",
        assignments,
        columns.len() + 1,
        NOTIFICATION_COLUMNS
    );
    args.push(UpdateArg::Int(id));

    Some(UpdateStatement { sql, args })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patch(type_message: Option<i32>, message: Option<&str>, task_title: Option<&str>) -> NotificationPatch {
        NotificationPatch {
            type_message,
            message: message.map(str::to_string),
            task_title: task_title.map(str::to_string),
        }
    }

    #[test]
    fn test_all_fields() {
        let statement = build_update(42, &patch(Some(3), Some("hello"), Some("release"))).unwrap();

        assert_eq!(
            statement.sql,
            "UPDATE notifications SET type_message = $1, message = $2, task_title = $3 WHERE id = $4 \
             RETURNING id, type_message, message, task_title, date"
        );
        assert_eq!(
            statement.args,
            vec![
                UpdateArg::Int(3),
                UpdateArg::Text("hello".to_string()),
                UpdateArg::Text("release".to_string()),
                UpdateArg::Int(42),
            ]
        );
    }

    #[test]
    fn test_single_field_is_numbered_from_one() {
        let statement = build_update(9, &patch(None, None, Some("t"))).unwrap();

        assert!(statement.sql.starts_with("UPDATE notifications SET task_title = $1 WHERE id = $2 "));
        assert_eq!(
            statement.args,
            vec![UpdateArg::Text("t".to_string()), UpdateArg::Int(9)]
        );
    }

    #[test]
    fn test_gap_in_fields_keeps_placeholders_contiguous() {
        let statement = build_update(5, &patch(Some(1), None, Some("t"))).unwrap();

        assert!(statement.sql.contains("SET type_message = $1, task_title = $2 WHERE id = $3"));
        assert_eq!(statement.args.len(), 3);
        assert_eq!(statement.args.last(), Some(&UpdateArg::Int(5)));
    }

    #[test]
    fn test_every_subset_sets_exactly_the_present_columns_in_order() {
        let order = ["type_message", "message", "task_title"];

        for mask in 1u8..8 {
            let p = patch(
                (mask & 1 != 0).then_some(8),
                (mask & 2 != 0).then_some("m"),
                (mask & 4 != 0).then_some("t"),
            );
            let expected: Vec<&str> = order
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << *i) != 0)
                .map(|(_, column)| *column)
                .collect();

            let statement = build_update(77, &p).unwrap();

            let set_clause = statement
                .sql
                .strip_prefix("UPDATE notifications SET ")
                .and_then(|rest| rest.split(" WHERE ").next())
                .unwrap();
            let assignments: Vec<String> = expected
                .iter()
                .enumerate()
                .map(|(i, column)| format!("{} = ${}", column, i + 1))
                .collect();
            assert_eq!(set_clause, assignments.join(", "), "mask {mask}");
            assert!(
                statement.sql.contains(&format!("WHERE id = ${} ", expected.len() + 1)),
                "mask {mask}"
            );
            assert_eq!(statement.args.len(), expected.len() + 1, "mask {mask}");
            assert_eq!(statement.args.last(), Some(&UpdateArg::Int(77)), "mask {mask}");
        }
    }

    #[test]
    fn test_zero_and_empty_values_are_still_set() {
        let statement = build_update(1, &patch(Some(0), Some(""), None)).unwrap();

        assert!(statement.sql.contains("SET type_message = $1, message = $2 WHERE id = $3"));
        assert_eq!(
            statement.args,
            vec![UpdateArg::Int(0), UpdateArg::Text(String::new()), UpdateArg::Int(1)]
        );
    }

    #[test]
    fn test_empty_patch_builds_nothing() {
        assert_eq!(build_update(1, &NotificationPatch::default()), None);
    }
}
