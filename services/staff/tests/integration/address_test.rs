use roster_staff::domain::types::{AddressFilter, AddressPatch, WriteMode};
use roster_staff::error::StaffServiceError;
use roster_staff::usecase::address::{
    CreateAddressUseCase, DeleteAddressUseCase, GetAddressUseCase, ListAddressesUseCase,
    UpdateAddressUseCase,
};
use roster_staff::usecase::manager::{CreateManagerUseCase, GetManagerUseCase};
use uuid::Uuid;

use crate::helpers::{Repos, address_patch, ann};

// ── CreateAddressUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_and_fetch_address() {
    let repos = Repos::new();
    let created = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(address_patch("Springfield"))
    .await
    .unwrap();

    let fetched = GetAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(created.id)
    .await
    .unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.city, "Springfield");
}

#[tokio::test]
async fn should_reject_blank_address_fields() {
    let repos = Repos::new();
    let result = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(AddressPatch {
        city: Some("   ".into()),
        ..address_patch("x")
    })
    .await;
    match result {
        Err(StaffServiceError::Validation(errors)) => {
            assert_eq!(errors.messages("city"), ["This field may not be blank."]);
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── UpdateAddressUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_patch_single_address_field() {
    let repos = Repos::new();
    let created = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(address_patch("Springfield"))
    .await
    .unwrap();

    let updated = UpdateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(
        created.id,
        AddressPatch {
            postal_code: Some("99999".into()),
            ..AddressPatch::default()
        },
        WriteMode::Patch,
    )
    .await
    .unwrap();
    assert_eq!(updated.postal_code, "99999");
    assert_eq!(updated.city, "Springfield");
}

#[tokio::test]
async fn should_require_every_field_on_replace() {
    let repos = Repos::new();
    let created = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(address_patch("Springfield"))
    .await
    .unwrap();

    let result = UpdateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(
        created.id,
        AddressPatch {
            city: Some("Paris".into()),
            ..AddressPatch::default()
        },
        WriteMode::Replace,
    )
    .await;
    assert!(
        matches!(result, Err(StaffServiceError::Validation(ref e)) if e.contains("country")),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_address() {
    let repos = Repos::new();
    let result = UpdateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(Uuid::now_v7(), address_patch("x"), WriteMode::Replace)
    .await;
    assert!(matches!(result, Err(StaffServiceError::AddressNotFound)));
}

// ── ListAddressesUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_filter_addresses_by_search_and_country() {
    let repos = Repos::new();
    let create = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    };
    create.execute(address_patch("Springfield")).await.unwrap();
    create
        .execute(AddressPatch {
            country: Some("France".into()),
            ..address_patch("Paris")
        })
        .await
        .unwrap();

    let list = ListAddressesUseCase {
        addresses: repos.addresses.clone(),
    };
    let found = list
        .execute(&AddressFilter {
            search: Some("SPRING".into()),
            ..AddressFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].city, "Springfield");

    let french = list
        .execute(&AddressFilter {
            country: Some("France".into()),
            ..AddressFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(french.len(), 1);
    assert_eq!(french[0].city, "Paris");

    let all = list.execute(&AddressFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

// ── DeleteAddressUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_clear_staff_reference_when_address_deleted() {
    let repos = Repos::new();
    let address = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(address_patch("Springfield"))
    .await
    .unwrap();

    let mut patch = ann();
    patch.staff.address = Some(Some(address.id));
    let manager = CreateManagerUseCase {
        managers: repos.managers.clone(),
        interns: repos.interns.clone(),
        addresses: repos.addresses.clone(),
    }
    .execute(patch)
    .await
    .unwrap();
    assert_eq!(manager.address.as_ref(), Some(&address));

    DeleteAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(address.id)
    .await
    .unwrap();

    let reloaded = GetManagerUseCase {
        managers: repos.managers.clone(),
    }
    .execute(manager.id)
    .await
    .unwrap();
    assert_eq!(reloaded.address, None);
    assert_eq!(reloaded.profile.address_id, None);
}

#[tokio::test]
async fn should_return_not_found_on_second_delete() {
    let repos = Repos::new();
    let address = CreateAddressUseCase {
        addresses: repos.addresses.clone(),
    }
    .execute(address_patch("Springfield"))
    .await
    .unwrap();
    let delete = DeleteAddressUseCase {
        addresses: repos.addresses.clone(),
    };

    delete.execute(address.id).await.unwrap();
    for _ in 0..2 {
        let result = delete.execute(address.id).await;
        assert!(
            matches!(result, Err(StaffServiceError::AddressNotFound)),
            "expected AddressNotFound, got {result:?}"
        );
    }
}
