//! Built-in board used when nothing has been persisted yet.

use crate::domain::board::Board;
use crate::domain::task::{Priority, Task, TaskId, TaskStatus};
use chrono::NaiveDate;
use std::collections::BTreeMap;

const SOLAR: &str = "Solar Funnel";
const INFRA: &str = "Infrastructure";

// (id, title, status, priority, project, created)
const SEED: &[(&str, &str, TaskStatus, Priority, &str, (i32, u32, u32))] = &[
    ("1", "Set up Supabase database", TaskStatus::Backlog, Priority::High, SOLAR, (2026, 2, 15)),
    ("2", "Build AI sales chatbot backend", TaskStatus::Backlog, Priority::High, SOLAR, (2026, 2, 15)),
    ("3", "Set up email service", TaskStatus::Backlog, Priority::Medium, SOLAR, (2026, 2, 15)),
    ("4", "Connect custom domain", TaskStatus::Backlog, Priority::Medium, SOLAR, (2026, 2, 15)),
    ("5", "Wire Cal.com calendar integration", TaskStatus::Backlog, Priority::Medium, SOLAR, (2026, 2, 15)),
    ("6", "Replace JSON file storage with Supabase", TaskStatus::Backlog, Priority::High, SOLAR, (2026, 2, 15)),
    ("7", "Add authentication to admin pages", TaskStatus::Backlog, Priority::Medium, SOLAR, (2026, 2, 15)),
    ("8", "Build email templates", TaskStatus::Backlog, Priority::Low, SOLAR, (2026, 2, 15)),
    ("9", "SEO optimization", TaskStatus::Backlog, Priority::Low, SOLAR, (2026, 2, 15)),
    ("10", "Audit GHL account", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 10)),
    ("11", "Build solar landing page", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 11)),
    ("12", "Build booking page", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 11)),
    ("13", "Build thank you page", TaskStatus::Done, Priority::Medium, SOLAR, (2026, 2, 11)),
    ("14", "Build leads API", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 12)),
    ("15", "Build bookings API", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 12)),
    ("16", "Build admin dashboard", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 13)),
    ("17", "Build leads management", TaskStatus::Done, Priority::High, SOLAR, (2026, 2, 13)),
    ("18", "Build kanban board", TaskStatus::Done, Priority::Medium, SOLAR, (2026, 2, 14)),
    ("19", "Restructure to monorepo", TaskStatus::Done, Priority::High, INFRA, (2026, 2, 16)),
    ("20", "Create GitHub account", TaskStatus::Done, Priority::High, INFRA, (2026, 2, 16)),
    ("21", "Deploy to Vercel", TaskStatus::Done, Priority::High, INFRA, (2026, 2, 17)),
];

/// The default board: the command center's starting backlog and finished work
pub fn seed_board() -> Board {
    let mut board = Board::new();
    for &(id, title, status, priority, project, (y, m, d)) in SEED {
        board.push(Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: None,
            status,
            priority,
            project: project.to_string(),
            created_at: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
            extra: BTreeMap::new(),
        });
    }
    board
}
