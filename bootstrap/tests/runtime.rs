use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use strata_auth_core::{PermissionFlags, RoleMenu};
use strata_bootstrap::init_runtime;
use strata_config::StrataConfig;
use strata_domain_core::{EntityObject, EntityOperate, EntityOperator, TypeKey};
use strata_errors::AppResult;
use strata_ports::{RecordStore, Row};

fn config(debug: bool) -> StrataConfig {
    StrataConfig {
        debug,
        ..StrataConfig::default()
    }
}

/// 统计保存次数，其余操作交给默认实现
#[derive(Default)]
struct CountingOperate {
    inner: EntityOperator<RoleMenu>,
    saves: AtomicUsize,
}

#[async_trait]
impl EntityOperate for CountingOperate {
    fn entity_type(&self) -> TypeKey {
        self.inner.entity_type()
    }

    fn entity_name(&self) -> &'static str {
        self.inner.entity_name()
    }

    fn table(&self) -> &'static str {
        self.inner.table()
    }

    fn create(&self) -> Box<dyn EntityObject> {
        self.inner.create()
    }

    fn from_row(&self, row: Row) -> AppResult<Box<dyn EntityObject>> {
        self.inner.from_row(row)
    }

    async fn find_by_key(
        &self,
        store: &dyn RecordStore,
        id: i64,
    ) -> AppResult<Option<Box<dyn EntityObject>>> {
        self.inner.find_by_key(store, id).await
    }

    async fn find_all(&self, store: &dyn RecordStore) -> AppResult<Vec<Box<dyn EntityObject>>> {
        self.inner.find_all(store).await
    }

    async fn save(&self, store: &dyn RecordStore, entity: &mut dyn EntityObject) -> AppResult<u64> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(store, entity).await
    }

    async fn delete(&self, store: &dyn RecordStore, entity: &dyn EntityObject) -> AppResult<u64> {
        self.inner.delete(store, entity).await
    }
}

#[test]
fn test_runtime_factory_discovers_role_menu() {
    let runtime = init_runtime(&config(false));
    let factory = runtime.factory();

    let descriptor = factory.resolve("RoleMenu").unwrap();
    assert!(descriptor.full_name.starts_with("strata_auth_core::"));

    let instance = factory.create("RoleMenu").unwrap();
    assert_eq!(instance.downcast_ref::<RoleMenu>(), Some(&RoleMenu::default()));
}

#[test]
fn test_configured_prefixes_exclude_modules() {
    let mut config = config(false);
    config.registry.excluded_module_prefixes = vec!["std".to_string(), "strata-auth".to_string()];
    let runtime = init_runtime(&config);

    assert!(runtime.factory().resolve("RoleMenu").is_none());
    assert!(runtime.factory().create_operate("RoleMenu").unwrap().is_none());
}

#[tokio::test]
async fn test_role_menu_uses_handle_registered_on_runtime_factory() {
    let runtime = init_runtime(&config(false));
    let counting = Arc::new(CountingOperate::default());
    runtime
        .factory()
        .register_operate(TypeKey::of::<RoleMenu>(), counting.clone());

    let mut item = RoleMenu::create(5, 7);
    assert_eq!(item.save(runtime.context()).await.unwrap(), 1);
    assert_eq!(counting.saves.load(Ordering::SeqCst), 1);

    item.set_permission(runtime.context(), PermissionFlags::INSERT)
        .await
        .unwrap();
    assert_eq!(counting.saves.load(Ordering::SeqCst), 2);

    let found = RoleMenu::find_by_role_and_menu(runtime.context(), 5, 7)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.permission_flag(), PermissionFlags::INSERT);
}

#[tokio::test]
async fn test_role_menu_through_runtime_context() {
    let mut runtime = init_runtime(&config(true));
    runtime.install_metrics().unwrap();

    let mut item = RoleMenu::create(1, 2);
    item.remove(PermissionFlags::ALL).add(PermissionFlags::INSERT);
    assert_eq!(item.save(runtime.context()).await.unwrap(), 1);

    let found = RoleMenu::find_by_role_and_menu(runtime.context(), 1, 2)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.permission_flag(), PermissionFlags::INSERT);

    let rendered = runtime.render_metrics().unwrap();
    assert!(rendered.contains("strata_audit_entries_total"));

    runtime.set_debug(false);
    assert_eq!(item.delete(runtime.context()).await.unwrap(), 1);
}
