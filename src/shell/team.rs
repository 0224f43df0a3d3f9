use anyhow::Result;
use console::style;

use rp_app::{JoinTeam, TeamStore};
use rp_core::team::TeamSnapshot;

use super::prompt;

pub fn print_login_required() {
    println!(
        "{}",
        style("Log in with an existing account to send a join request.").yellow()
    );
}

pub async fn offer_team_join(join: &JoinTeam, store: &TeamStore) -> Result<()> {
    if !prompt::confirm("Request to join a team now?", false).await? {
        return Ok(());
    }
    let team_id = prompt::text("Team id", "").await?;
    let team_id = team_id.trim();
    if team_id.is_empty() {
        return Ok(());
    }
    join_team(join, store, team_id).await
}

/// Send the request and print what the team store published for it.
pub async fn join_team(join: &JoinTeam, store: &TeamStore, team_id: &str) -> Result<()> {
    let mut updates = store.subscribe();
    // Failures are published to the store; rendering it is enough here.
    let _ = join.execute(team_id).await;

    if updates.has_changed()? {
        let snapshot = updates.borrow_and_update().clone();
        for line in snapshot_lines(&snapshot, team_id) {
            println!("{line}");
        }
    }
    Ok(())
}

fn snapshot_lines(snapshot: &TeamSnapshot, team_id: &str) -> Vec<String> {
    if let Some(error) = &snapshot.last_error {
        return vec![style(format!("✖ {error}")).red().to_string()];
    }
    snapshot
        .pending_requests
        .iter()
        .filter(|r| r.team_id == team_id)
        .map(|r| {
            style(format!("✔ Join request for {} is {}", r.team_name, r.status))
                .green()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_core::team::TeamJoinRequest;

    #[test]
    fn error_wins_over_requests() {
        console::set_colors_enabled(false);
        let mut snapshot = TeamSnapshot::default();
        snapshot.record_request(TeamJoinRequest {
            request_id: "11".into(),
            team_id: "t1".into(),
            team_name: "Blue Team".into(),
            status: "pending".into(),
        });
        assert_eq!(
            snapshot_lines(&snapshot, "t1"),
            vec!["✔ Join request for Blue Team is pending".to_string()]
        );
        assert!(snapshot_lines(&snapshot, "t2").is_empty());

        snapshot.last_error = Some("Team is full".into());
        assert_eq!(snapshot_lines(&snapshot, "t1"), vec!["✖ Team is full".to_string()]);
    }
}
