//! Composable UI component renderers.
//!
//! Each component prints at an explicit row and returns the next free row, so
//! screens are laid out by threading a row counter from top to bottom.
//!
//! # Components
//!
//! - [`header`]: title bar with optional subtitle
//! - [`footer`]: keybinding hints
//! - [`search`]: search input box
//! - [`table`]: character rows with tier badges
//! - [`pagination`]: page indicator
//! - [`detail`]: character detail
//! - [`form`]: add/edit form
//! - [`tier_list`]: tier reference table
//! - [`empty`]: centered loading / empty / not-found message
//! - [`alert`]: modal message box
//!
//! [`render_screen`] lays them out:
//!
//! ```text
//! [blank line]
//! [Header (+ subtitle)]
//! [Border]
//! [Body]
//! [Blank padding to fill screen]
//! [Border]
//! [Footer]
//! ```

mod alert;
mod detail;
mod empty;
mod footer;
mod form;
mod header;
mod pagination;
mod search;
mod table;
mod tier_list;

use crate::ui::helpers::{self, fit, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, CharacterListView, TierBanner, TierListView, UIViewModel};

use alert::render_alert;
use detail::render_detail;
use empty::render_empty_state;
use footer::render_footer;
use form::render_form;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};
use tier_list::{render_tier_error, render_tier_rows};

/// Renders a horizontal border line. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a whole screen, then the alert on top of it.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let footer_row = rows.saturating_sub(1).max(1);
    let bottom = footer_row.saturating_sub(1);

    let mut current_row = render_header(2, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    match &vm.body {
        Body::Characters(list) => render_character_list(current_row, bottom, list, theme, cols),
        Body::Detail(view) => {
            render_detail(current_row + 1, bottom, view, theme, cols);
        }
        Body::Form(view) => {
            render_form(current_row + 1, bottom, view, theme, cols);
        }
        Body::Tiers(view) => render_tier_list(current_row, bottom, view, theme, cols),
        Body::Message(empty) => {
            render_empty_state(current_row + 3, empty, theme, cols);
        }
    }

    render_border(bottom, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);

    if let Some(alert) = &vm.alert {
        render_alert(alert, theme, rows, cols);
    }
}

fn render_banner(row: usize, banner: &TierBanner, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 3);
    let badge_len = helpers::render_badge(&banner.badge, theme);
    print!(" {}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&banner.name, cols.saturating_sub(badge_len + 5)));
    print!("{}", Theme::reset());

    if banner.description.is_empty() {
        return row + 1;
    }
    position_cursor(row + 1, 3);
    print!(
        "{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        fit(&banner.description, cols.saturating_sub(4)),
        Theme::reset()
    );
    row + 2
}

fn render_character_list(row: usize, bottom: usize, list: &CharacterListView, theme: &Theme, cols: usize) {
    let mut current_row = row;

    if let Some(banner) = &list.banner {
        current_row = render_banner(current_row, banner, theme, cols) + 1;
    }
    if let Some(search) = &list.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    position_cursor(current_row, 3);
    print!("{}{}{}", Theme::fg(&theme.colors.text_dim), list.summary, Theme::reset());
    current_row += 1;

    if let Some(error) = &list.error {
        position_cursor(current_row, 3);
        print!("{}{}{}", Theme::fg(&theme.colors.error_fg), fit(error, cols.saturating_sub(4)), Theme::reset());
        current_row += 1;
    }

    if let Some(empty) = &list.empty_state {
        render_empty_state(current_row + 1, empty, theme, cols);
        return;
    }

    let rows_bottom = if list.pagination.is_some() {
        bottom.saturating_sub(1)
    } else {
        bottom
    };
    current_row = render_table_headers(current_row + 1, theme, cols);
    render_table_rows(current_row, rows_bottom, &list.items, theme, cols);

    if let Some(pagination) = &list.pagination {
        render_pagination(rows_bottom, pagination, theme, cols);
    }
}

fn render_tier_list(row: usize, bottom: usize, view: &TierListView, theme: &Theme, cols: usize) {
    let mut current_row = row;
    if let Some(error) = &view.error {
        current_row = render_tier_error(current_row, error, theme, cols);
    }
    if view.is_refreshing {
        position_cursor(current_row, 3);
        print!("{}refreshing…{}", Theme::fg(&theme.colors.warning_fg), Theme::reset());
        current_row += 1;
    }
    render_tier_rows(current_row, bottom, &view.items, theme, cols);
}
