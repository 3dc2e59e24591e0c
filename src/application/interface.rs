use crate::entity::module::{Module, ModulesMap};

pub trait ModuleCatalogTrait {
    fn get_module(&self, module_code: &str) -> Option<&Module>;

    fn has_module(&self, module_code: &str) -> bool {
        self.get_module(module_code).is_some()
    }
}

// メモリ上のカタログもそのまま使えるようにする
impl ModuleCatalogTrait for ModulesMap {
    fn get_module(&self, module_code: &str) -> Option<&Module> {
        self.get(module_code)
    }
}
