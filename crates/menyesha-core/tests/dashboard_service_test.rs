//! Service tests for the dashboard aggregators.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use common::{InMemoryComplaintRepository, InMemoryUserRepository};
use menyesha_core::repositories::{ComplaintRepository, UserRepository};
use menyesha_core::services::DashboardService;
use menyesha_core::{Complaint, ComplaintStatus, NewComplaint, User, UserStatus};

fn complaint(institution: &str, sector: &str, citizen: Option<Uuid>) -> Complaint {
    Complaint::new(
        NewComplaint {
            description: "d".into(),
            specific_location: "l".into(),
            province: "Kigali".into(),
            district: "Gasabo".into(),
            sector: sector.into(),
            institution: Some(institution.into()),
            ..Default::default()
        },
        citizen,
    )
}

fn resolved(mut c: Complaint, days: i64) -> Complaint {
    c.status = ComplaintStatus::Resolved;
    c.resolved_at = Some(c.submitted_at + Duration::days(days));
    c
}

fn services() -> (
    Arc<InMemoryComplaintRepository>,
    Arc<InMemoryUserRepository>,
    DashboardService,
) {
    let complaints = Arc::new(InMemoryComplaintRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());
    let svc = DashboardService::new(complaints.clone(), users.clone());
    (complaints, users, svc)
}

#[tokio::test]
async fn citizen_dashboard_counts_and_recent() {
    let (complaints, _, svc) = services();
    let me = Uuid::new_v4();

    complaints
        .create(&complaint("REG", "Remera", Some(me)))
        .await
        .unwrap();
    complaints
        .create(&resolved(complaint("REG", "Remera", Some(me)), 2))
        .await
        .unwrap();
    // Someone else's complaint stays out of my stats.
    complaints
        .create(&complaint("REG", "Remera", Some(Uuid::new_v4())))
        .await
        .unwrap();

    let dashboard = svc.citizen_dashboard(me).await.unwrap();
    assert_eq!(dashboard.stats.total, 2);
    assert_eq!(dashboard.stats.submitted, 1);
    assert_eq!(dashboard.stats.resolved, 1);
    assert_eq!(dashboard.stats.in_progress, 0);
    assert_eq!(dashboard.recent.len(), 2);
    assert!(dashboard.recent.iter().all(|c| c.citizen_id == Some(me)));
}

#[tokio::test]
async fn recent_is_capped_at_ten_newest_first() {
    let (complaints, _, svc) = services();
    let me = Uuid::new_v4();

    for i in 0..12 {
        let mut c = complaint("REG", "Remera", Some(me));
        c.submitted_at = Utc::now() - Duration::minutes(12 - i);
        complaints.create(&c).await.unwrap();
    }

    let dashboard = svc.citizen_dashboard(me).await.unwrap();
    assert_eq!(dashboard.recent.len(), 10);
    for pair in dashboard.recent.windows(2) {
        assert!(pair[0].submitted_at >= pair[1].submitted_at);
    }
}

#[tokio::test]
async fn institution_stats_with_no_resolved_reports_zero_days() {
    let (complaints, _, svc) = services();

    complaints
        .create(&complaint("REG", "Remera", None))
        .await
        .unwrap();

    let stats = svc.institution_stats("REG").await.unwrap();
    assert_eq!(stats.total_complaints, 1);
    assert_eq!(stats.resolved, 0);
    assert_eq!(stats.avg_resolution_time, "0 days");
}

#[tokio::test]
async fn institution_stats_average_resolution() {
    let (complaints, _, svc) = services();

    complaints
        .create(&resolved(complaint("REG", "Remera", None), 2))
        .await
        .unwrap();
    complaints
        .create(&resolved(complaint("REG", "Remera", None), 3))
        .await
        .unwrap();
    // Other institution's resolution must not skew the average.
    complaints
        .create(&resolved(complaint("WASAC", "Remera", None), 30))
        .await
        .unwrap();

    let stats = svc.institution_stats("REG").await.unwrap();
    assert_eq!(stats.resolved, 2);
    assert_eq!(stats.avg_resolution_time, "2.5 days");
}

#[tokio::test]
async fn sector_new_today_excludes_yesterday() {
    let (complaints, _, svc) = services();

    complaints
        .create(&complaint("REG", "Remera", None))
        .await
        .unwrap();

    let mut old = complaint("REG", "Remera", None);
    old.submitted_at = Utc::now() - Duration::days(2);
    complaints.create(&old).await.unwrap();

    let stats = svc.sector_stats("Remera").await.unwrap();
    assert_eq!(stats.total_complaints, 2);
    assert_eq!(stats.new_complaints, 1);
}

#[tokio::test]
async fn admin_stats_cover_users_and_complaints() {
    let (complaints, users, svc) = services();

    users
        .create(&User::new_citizen(
            "Alice".into(),
            "a@x.com".into(),
            "hash".into(),
            "+250788".into(),
            None,
            None,
        ))
        .await
        .unwrap();

    let admin = User::new_institution_admin(
        "REG Admin".into(),
        "reg@x.com".into(),
        "hash".into(),
        "+250788".into(),
        menyesha_core::InstitutionProfile {
            name: "REG".into(),
            code: "REG".into(),
            category: None,
            address: None,
            description: None,
        },
    );
    users.create(&admin).await.unwrap();
    users
        .set_status(&admin.id, UserStatus::Inactive)
        .await
        .unwrap();

    complaints
        .create(&resolved(complaint("REG", "Remera", None), 1))
        .await
        .unwrap();
    complaints
        .create(&complaint("WASAC", "Kimironko", None))
        .await
        .unwrap();

    let stats = svc.admin_stats().await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_citizens, 1);
    assert_eq!(stats.total_institution_admins, 1);
    assert_eq!(stats.active_institutions, 0);
    assert_eq!(stats.total_complaints, 2);
    assert_eq!(stats.resolved_complaints, 1);
    assert_eq!(stats.avg_resolution_time, "1.0 days");
}
