use uuid::Uuid;

use roster_staff::domain::types::{InternFilter, InternPatch, MentorFilter, StaffPatch, WriteMode};
use roster_staff::error::StaffServiceError;
use roster_staff::usecase::intern::{
    CreateInternUseCase, DeleteInternUseCase, GetInternUseCase, ListInternsUseCase,
    UpdateInternUseCase,
};
use roster_staff::usecase::manager::{
    CreateManagerUseCase, GetManagerDetailUseCase, UpdateManagerUseCase,
};
use roster_staff::usecase::staff::invalid_pk;

use crate::helpers::{
    MemAddressRepo, MemInternRepo, MemManagerRepo, Repos, ann, date, intern_patch, manager_patch,
};

type CreateIntern = CreateInternUseCase<MemManagerRepo, MemInternRepo, MemAddressRepo>;

fn create(repos: &Repos) -> CreateIntern {
    CreateInternUseCase {
        managers: repos.managers.clone(),
        interns: repos.interns.clone(),
        addresses: repos.addresses.clone(),
    }
}

fn list(repos: &Repos) -> ListInternsUseCase<MemInternRepo> {
    ListInternsUseCase {
        interns: repos.interns.clone(),
    }
}

async fn create_ann(repos: &Repos) -> Uuid {
    CreateManagerUseCase {
        managers: repos.managers.clone(),
        interns: repos.interns.clone(),
        addresses: repos.addresses.clone(),
    }
    .execute(ann())
    .await
    .unwrap()
    .id
}

// ── CreateInternUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_link_intern_to_mentor_everywhere() {
    let repos = Repos::new();
    let ann_id = create_ann(&repos).await;
    let intern = create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", Some(ann_id)))
        .await
        .unwrap();
    create(&repos)
        .execute(intern_patch("Cy", "cy@x.com", None))
        .await
        .unwrap();

    assert_eq!(intern.internship_end_date, date(2024, 6, 1));
    assert_eq!(intern.mentor_id(), Some(ann_id));
    assert_eq!(intern.mentor_name(), Some("Ann Lee"));

    let by_mentor = list(&repos)
        .execute(&InternFilter {
            mentor: Some(MentorFilter::Assigned(ann_id)),
            ..InternFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_mentor, [intern.clone()]);

    let without = list(&repos)
        .execute(&InternFilter {
            mentor: Some(MentorFilter::Unassigned),
            ..InternFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(without.len(), 1);
    assert!(without.iter().all(|i| i.id != intern.id));

    let detail = GetManagerDetailUseCase {
        managers: repos.managers.clone(),
        interns: repos.interns.clone(),
    }
    .execute(ann_id)
    .await
    .unwrap();
    assert_eq!(detail.interns, [intern]);
}

#[tokio::test]
async fn should_reject_unknown_mentor() {
    let repos = Repos::new();
    let missing = Uuid::now_v7();
    let errors = match create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", Some(missing)))
        .await
    {
        Err(StaffServiceError::Validation(errors)) => errors,
        other => panic!("expected Validation, got {other:?}"),
    };
    assert_eq!(errors.messages("mentor"), [invalid_pk(missing)]);
}

#[tokio::test]
async fn should_require_internship_end_date() {
    let repos = Repos::new();
    let result = create(&repos)
        .execute(InternPatch {
            internship_end_date: None,
            ..intern_patch("Bo", "bo@x.com", None)
        })
        .await;
    assert!(
        matches!(result, Err(StaffServiceError::Validation(ref e)) if e.contains("internship_end_date")),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_email_used_by_manager() {
    let repos = Repos::new();
    create_ann(&repos).await;
    let result = create(&repos)
        .execute(intern_patch("Bo", "ann@x.com", None))
        .await;
    assert!(
        matches!(result, Err(StaffServiceError::Validation(ref e)) if e.contains("email")),
        "expected Validation, got {result:?}"
    );
}

// ── Role resolution ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_follow_mentor_rename_in_role() {
    let repos = Repos::new();
    let ann_id = create_ann(&repos).await;
    let intern = create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", Some(ann_id)))
        .await
        .unwrap();

    UpdateManagerUseCase {
        managers: repos.managers.clone(),
        interns: repos.interns.clone(),
        addresses: repos.addresses.clone(),
    }
    .execute(
        ann_id,
        manager_patch("Ann", "Smith", "ann@x.com", "Engineering"),
        WriteMode::Replace,
    )
    .await
    .unwrap();

    let reloaded = GetInternUseCase {
        interns: repos.interns.clone(),
    }
    .execute(intern.id)
    .await
    .unwrap();
    assert_eq!(reloaded.role(), "Intern - Mentored by Ann Smith");
}

// ── UpdateInternUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_clear_mentor_with_explicit_null() {
    let repos = Repos::new();
    let ann_id = create_ann(&repos).await;
    let intern = create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", Some(ann_id)))
        .await
        .unwrap();
    let update = UpdateInternUseCase {
        managers: repos.managers.clone(),
        interns: repos.interns.clone(),
        addresses: repos.addresses.clone(),
    };

    let renamed = update
        .execute(
            intern.id,
            InternPatch {
                staff: StaffPatch {
                    first_name: Some("Bob".into()),
                    ..StaffPatch::default()
                },
                ..InternPatch::default()
            },
            WriteMode::Patch,
        )
        .await
        .unwrap();
    assert_eq!(renamed.full_name(), "Bob Park");
    assert_eq!(renamed.mentor_id(), Some(ann_id));

    let detached = update
        .execute(
            intern.id,
            InternPatch {
                mentor: Some(None),
                ..InternPatch::default()
            },
            WriteMode::Patch,
        )
        .await
        .unwrap();
    assert_eq!(detached.mentor, None);
    assert_eq!(detached.role(), "Intern - Mentored by No mentor assigned");
}

// ── ListInternsUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_search_interns_by_name_or_email() {
    let repos = Repos::new();
    create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", None))
        .await
        .unwrap();
    create(&repos)
        .execute(intern_patch("Cy", "cy@y.org", None))
        .await
        .unwrap();

    let found = list(&repos)
        .execute(&InternFilter {
            search: Some("Y.ORG".into()),
            ..InternFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].profile.first_name, "Cy");

    let all = list(&repos).execute(&InternFilter::default()).await.unwrap();
    let names: Vec<String> = all.iter().map(|i| i.full_name()).collect();
    assert_eq!(names, ["Bo Park", "Cy Park"]);
}

#[tokio::test]
async fn should_search_interns_by_mentor_name() {
    let repos = Repos::new();
    let ann_id = create_ann(&repos).await;
    create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", Some(ann_id)))
        .await
        .unwrap();
    create(&repos)
        .execute(intern_patch("Cy", "cy@x.com", None))
        .await
        .unwrap();

    for needle in ["ann", "LEE"] {
        let found = list(&repos)
            .execute(&InternFilter {
                search: Some(needle.into()),
                ..InternFilter::default()
            })
            .await
            .unwrap();
        let names: Vec<String> = found.iter().map(|i| i.full_name()).collect();
        assert_eq!(names, ["Bo Park"], "{needle}");
    }
}

#[tokio::test]
async fn should_filter_plain_list_by_mentor_and_end_date() {
    let repos = Repos::new();
    let ann_id = create_ann(&repos).await;
    let bo = create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", Some(ann_id)))
        .await
        .unwrap();
    let cy = create(&repos)
        .execute(InternPatch {
            internship_end_date: Some(date(2025, 1, 31)),
            ..intern_patch("Cy", "cy@x.com", None)
        })
        .await
        .unwrap();

    let ending = list(&repos)
        .execute(&InternFilter {
            internship_end_date: Some(date(2025, 1, 31)),
            ..InternFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(ending, [cy]);

    let mentored = list(&repos)
        .execute(&InternFilter {
            mentor: Some(MentorFilter::Assigned(ann_id)),
            internship_end_date: Some(date(2024, 6, 1)),
            ..InternFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(mentored, [bo]);
}

// ── DeleteInternUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_intern_once() {
    let repos = Repos::new();
    let intern = create(&repos)
        .execute(intern_patch("Bo", "bo@x.com", None))
        .await
        .unwrap();
    let delete = DeleteInternUseCase {
        interns: repos.interns.clone(),
    };
    delete.execute(intern.id).await.unwrap();

    let again = delete.execute(intern.id).await;
    assert!(matches!(again, Err(StaffServiceError::InternNotFound)));
    let fetched = GetInternUseCase {
        interns: repos.interns.clone(),
    }
    .execute(intern.id)
    .await;
    assert!(matches!(fetched, Err(StaffServiceError::InternNotFound)));
}
