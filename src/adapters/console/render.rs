//! Plain-text rendering of console results.
//!
//! Pure functions producing the text the CLI prints on stdout, kept apart
//! from the handlers so the layout can be tested without a terminal.

use crate::application::handlers::codes::CodeListing;
use crate::application::handlers::membership::StoredMembership;
use crate::application::handlers::replay::ReplayView;
use crate::application::Notice;
use crate::domain::access_code::{AccessCode, CodeDetail, CodeStatistics};
use crate::domain::foundation::Timestamp;
use crate::domain::membership::{display_label, DenialReason};

fn timestamp_or_dash(at: Option<&Timestamp>) -> String {
    at.map_or_else(|| "-".to_string(), |t| t.to_string())
}

fn status_badges(code: &AccessCode) -> String {
    let mut badges = String::from(if code.is_active { "Active" } else { "Inactive" });
    if code.is_used {
        badges.push_str(", Used");
    }
    badges
}

/// Statistics header shown above the code table.
pub fn statistics(stats: &CodeStatistics) -> String {
    format!(
        "Total: {}  Active: {}  Used: {}  Expired: {}\n",
        stats.total_codes, stats.active_codes, stats.used_codes, stats.expired_codes
    )
}

/// One listing page: statistics, the current page of codes and the pager.
pub fn listing(listing: &CodeListing) -> String {
    let mut out = statistics(&listing.statistics);

    out.push_str(&format!("Filter: {}", listing.filter));
    if !listing.search.trim().is_empty() {
        out.push_str(&format!("  Search: \"{}\"", listing.search.trim()));
    }
    out.push('\n');

    let page = listing.current_page();
    if page.items.is_empty() {
        out.push_str("\nTidak ada code ditemukan\n");
    } else {
        out.push('\n');
        for code in page.items {
            out.push_str(&format!(
                "{}  {}  [{}]  {}  {}/{}  {}  exp {}\n",
                code.code,
                code.email,
                code.code_type,
                code.purpose,
                code.usage_count,
                code.usage_limit,
                status_badges(code),
                timestamp_or_dash(code.expires_at.as_ref()),
            ));
        }
    }

    out.push_str(&format!(
        "\nPage {} of {} ({} codes)\n",
        page.number, page.total_pages, page.total_items
    ));
    out
}

/// Full record of one code followed by its usage history.
pub fn code_detail(detail: &CodeDetail) -> String {
    let code = &detail.code;
    let mut out = format!("Code: {}\n", code.code);
    out.push_str(&format!("Email: {}\n", code.email));
    out.push_str(&format!("Type: {}\n", code.code_type));
    out.push_str(&format!("Purpose: {}\n", code.purpose));
    out.push_str(&format!("Usage: {}/{}\n", code.usage_count, code.usage_limit));
    out.push_str(&format!(
        "Status: {}\n",
        if code.is_active { "Active" } else { "Inactive" }
    ));
    out.push_str(&format!("Used: {}\n", if code.is_used { "Yes" } else { "No" }));
    out.push_str(&format!("Created At: {}\n", timestamp_or_dash(code.created_at.as_ref())));
    out.push_str(&format!("Updated At: {}\n", timestamp_or_dash(code.updated_at.as_ref())));
    out.push_str(&format!("Expires At: {}\n", timestamp_or_dash(code.expires_at.as_ref())));
    if let Some(last_used) = &code.last_used_at {
        out.push_str(&format!("Last Used: {}\n", last_used));
    }

    if !code.metadata.is_empty() {
        out.push_str("\nMetadata:\n");
        let pretty = serde_json::to_string_pretty(&code.metadata).unwrap_or_default();
        out.push_str(&pretty);
        out.push('\n');
    }

    if !detail.usage_history.is_empty() {
        out.push_str("\nUsage History:\n");
        for record in &detail.usage_history {
            out.push_str(&format!(
                "- {} ({}) {}",
                record.action.to_uppercase(),
                record.status,
                timestamp_or_dash(record.at.as_ref()),
            ));
            if let Some(ip) = &record.ip_address {
                out.push_str(&format!(" ip {}", ip));
            }
            if let Some(error) = &record.error_message {
                out.push_str(&format!(" error: {}", error));
            }
            out.push('\n');
        }
    }
    out
}

/// The unlocked replay screen.
pub fn replay_view(view: &ReplayView) -> String {
    let mut out = format!("{}\n", view.title);
    out.push_str(&format!("Playback ID: {}\n", view.playback_id));
    out.push_str(&format!("Viewer: {}\n", view.viewer_id));
    out.push_str(&format!("Membership: {}\n", view.plan_label));
    out.push_str(&format!("Sisa masa aktif: {}\n", view.remaining));
    out.push_str(&format!("Berlaku sampai: {}\n", view.expires_at));
    out.push_str(&format!("Email: {}\n", view.email));
    out
}

/// The locked replay screen.
pub fn denial(reason: &DenialReason) -> String {
    format!("Akses ditolak ({}): {}\n", reason.code(), reason.user_message())
}

/// The stored membership record, without its credential.
pub fn stored_membership(stored: &StoredMembership) -> String {
    match stored {
        StoredMembership::Absent => "Tidak ada membership tersimpan\n".to_string(),
        StoredMembership::Unreadable { raw } => {
            format!("Data membership tidak valid: {}\n", raw)
        }
        StoredMembership::Readable(record) => {
            let mut out = format!("Membership: {}\n", display_label(record.raw_plan_type()));
            out.push_str(&format!("Email: {}\n", record.email_or_placeholder()));
            out.push_str(&format!(
                "Registrasi: {}\n",
                timestamp_or_dash(record.registered_at().as_ref())
            ));
            out.push_str(&format!(
                "Token: {}\n",
                if record.token().is_some() { "tersimpan" } else { "-" }
            ));
            out
        }
    }
}

/// A console notice, prefixed by its kind.
pub fn notice(notice: &Notice) -> String {
    let prefix = if notice.is_error() { "✗" } else { "✓" };
    format!("{} {}\n", prefix, notice.message)
}
