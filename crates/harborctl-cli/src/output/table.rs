//! Table representations of API models.

use comfy_table::{presets, Cell, ContentArrangement, Table};

use harborctl_client::models::{
    CveAllowlist, OverallHealthStatus, UserGroup, UserGroupSearchItem, UserGroupType,
};
use harborctl_config::TableSettings;

use crate::style::health_color;

/// Maps a value to its tabular representation.
pub trait Tabular {
    /// Builds a table for this value.
    fn table(&self, settings: &TableSettings) -> Table;
}

/// Creates an empty table with the given headers and the configured style.
pub(crate) fn base_table(headers: &[&str], settings: &TableSettings) -> Table {
    let mut table = Table::new();
    let preset = if settings.compact {
        presets::UTF8_FULL_CONDENSED
    } else {
        presets::UTF8_FULL
    };
    table
        .load_preset(preset)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.to_vec());
    table
}

fn opt_string(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn opt_display<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl Tabular for CveAllowlist {
    fn table(&self, settings: &TableSettings) -> Table {
        let mut headers = vec!["ID", "Project ID", "Expires", "CVEs"];
        if settings.description {
            headers.extend(["Created", "Updated"]);
        }
        let mut table = base_table(&headers, settings);

        let cves = self
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|item| item.cve_id.as_deref())
            .collect::<Vec<_>>()
            .join(", ");
        let mut row = vec![
            opt_display(self.id),
            opt_display(self.project_id),
            opt_display(self.expires_at),
            cves,
        ];
        if settings.description {
            row.push(opt_string(self.creation_time.as_ref()));
            row.push(opt_string(self.update_time.as_ref()));
        }
        table.add_row(row);
        table
    }
}

fn group_type_name(code: Option<i32>) -> String {
    match code {
        Some(code) => UserGroupType::from_i32(code)
            .map_or_else(|| code.to_string(), |t| t.to_string()),
        None => String::new(),
    }
}

fn usergroup_table(groups: &[UserGroup], settings: &TableSettings) -> Table {
    let mut table = base_table(&["ID", "Name", "Type", "LDAP Group DN"], settings);
    for group in groups {
        table.add_row(vec![
            opt_display(group.id),
            opt_string(group.group_name.as_ref()),
            group_type_name(group.group_type),
            opt_string(group.ldap_group_dn.as_ref()),
        ]);
    }
    table
}

impl Tabular for UserGroup {
    fn table(&self, settings: &TableSettings) -> Table {
        usergroup_table(std::slice::from_ref(self), settings)
    }
}

impl Tabular for Vec<UserGroup> {
    fn table(&self, settings: &TableSettings) -> Table {
        usergroup_table(self, settings)
    }
}

impl Tabular for Vec<UserGroupSearchItem> {
    fn table(&self, settings: &TableSettings) -> Table {
        let mut table = base_table(&["ID", "Name", "Type"], settings);
        for item in self {
            table.add_row(vec![
                opt_display(item.id),
                opt_string(item.group_name.as_ref()),
                group_type_name(item.group_type),
            ]);
        }
        table
    }
}

impl Tabular for OverallHealthStatus {
    fn table(&self, settings: &TableSettings) -> Table {
        let mut table = base_table(&["Component", "Status", "Error"], settings);
        table.add_row(vec![
            Cell::new("overall"),
            Cell::new(opt_string(self.status.as_ref())).fg(health_color(self.status.as_deref())),
            Cell::new(""),
        ]);
        for component in self.components.as_deref().unwrap_or_default() {
            table.add_row(vec![
                Cell::new(opt_string(component.name.as_ref())),
                Cell::new(opt_string(component.status.as_ref()))
                    .fg(health_color(component.status.as_deref())),
                Cell::new(opt_string(component.error.as_ref())),
            ]);
        }
        table
    }
}
