//! Per-type email rendering.
//!
//! Every notification shares one HTML layout with four placeholders. Values
//! from the request are HTML-escaped before they reach the layout, and the
//! layout is filled in a single pass so a value can never introduce a
//! placeholder of its own.

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use messaging::notify::NotificationRequest;

const NOTIFICATION_TEMPLATE: &str = include_str!("../../templates/notification.html");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

struct Content {
    title: String,
    /// Already-escaped HTML fragment.
    body: String,
    action_path: String,
    action_label: &'static str,
}

/// Render `request` with links rooted at `base_url`.
#[must_use]
pub fn render(request: &NotificationRequest, base_url: &str) -> RenderedEmail {
    let content = content_for(request);
    let title = escape_html(&content.title);
    let action_url = escape_html(&format!("{base_url}{}", content.action_path));
    let html = fill(
        NOTIFICATION_TEMPLATE,
        &[
            ("TITLE", title.as_str()),
            ("BODY", content.body.as_str()),
            ("ACTION_URL", action_url.as_str()),
            ("ACTION_LABEL", content.action_label),
        ],
    );
    RenderedEmail { subject: content.title, html }
}

fn content_for(request: &NotificationRequest) -> Content {
    match request {
        NotificationRequest::TaskAssigned(n) => {
            let mut body = paragraph(&format!("{} assigned you \"{}\" for {}.", n.assigner_name, n.task_title, n.event_name));
            if let Some(due) = &n.due_date {
                body.push_str(&paragraph(&format!("Due {due}.")));
            }
            Content {
                title: format!("New task: {}", n.task_title),
                body,
                action_path: format!("/events/{}/tasks", path_segment(&n.event_id)),
                action_label: "View task",
            }
        }
        NotificationRequest::CollaboratorInvitation(n) => {
            let role = n.role.as_deref().map(|r| format!(" as {r}")).unwrap_or_default();
            Content {
                title: format!("You're invited to {}", n.event_name),
                body: paragraph(&format!("{} invited you to collaborate on {}{role}.", n.inviter_name, n.event_name)),
                action_path: format!("/invitations/{}", path_segment(&n.invitation_token)),
                action_label: "Accept invitation",
            }
        }
        NotificationRequest::ChatMessage(n) => Content {
            title: format!("New message about {}", n.event_name),
            body: format!(
                "{}<blockquote style=\"margin:12px 0;padding-left:12px;border-left:3px solid #d4d4d8;\">{}</blockquote>",
                paragraph(&format!("{} wrote:", n.sender_name)),
                escape_html(&n.message_preview),
            ),
            action_path: format!("/events/{}/messages", path_segment(&n.event_id)),
            action_label: "Open conversation",
        },
        NotificationRequest::EventUpdated(n) => {
            let mut body = paragraph(&format!("{} updated {}.", n.updater_name, n.event_name));
            if !n.changes.is_empty() {
                body.push_str("<ul>");
                for change in &n.changes {
                    body.push_str(&format!("<li>{}</li>", escape_html(change)));
                }
                body.push_str("</ul>");
            }
            Content {
                title: format!("{} was updated", n.event_name),
                body,
                action_path: format!("/events/{}", path_segment(&n.event_id)),
                action_label: "View event",
            }
        }
        NotificationRequest::CollaboratorStatusChanged(n) => Content {
            title: format!("{} {} your invitation", n.collaborator_name, n.status),
            body: paragraph(&format!("{} {} your invitation to {}.", n.collaborator_name, n.status, n.event_name)),
            action_path: format!("/events/{}/collaborators", path_segment(&n.event_id)),
            action_label: "View collaborators",
        },
        NotificationRequest::VendorInvitation(n) => Content {
            title: format!("{} invited {} to {}", n.inviter_name, n.vendor_name, n.event_name),
            body: paragraph(&format!(
                "{} would like {} to take part in {}.",
                n.inviter_name, n.vendor_name, n.event_name
            )),
            action_path: format!("/vendor-invitations/{}", path_segment(&n.invitation_token)),
            action_label: "Respond",
        },
    }
}

fn paragraph(text: &str) -> String {
    format!("<p style=\"margin:0 0 12px;\">{}</p>", escape_html(text))
}

/// Keep ids and tokens inside their path segment.
fn path_segment(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Replace `{{NAME}}` placeholders in one pass. Unknown names are kept.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}
