use core::any::TypeId;

use crate::container::ContainerBuilders;
use crate::error::Name;
use crate::hash::{HashMap, HashSet, TypeIdMap};
use crate::info::{Shape, Ty, TypeInfo, Typed};
use crate::registry::{Registration, Strategy, StrategyEntry};
use crate::{Error, provider};

// -----------------------------------------------------------------------------
// Registry

/// The table of registered types.
///
/// Entries are addressable by [`TypeId`] and by name. A name claimed by two
/// different types is ambiguous: it stops resolving and is reported by
/// [`is_ambiguous`](Registry::is_ambiguous).
///
/// Registration needs `&mut Registry`, conversions only `&Registry`. Build it
/// once at start-up and pass it to the engine; wrap it in a
/// [`SharedRegistry`](crate::registry::SharedRegistry) if types must be
/// registered while other threads convert.
///
/// # Example
///
/// ```
/// use autodict_core::registry::Registry;
/// use std::path::PathBuf;
///
/// let registry = Registry::new();
/// let info = registry.lookup_by_name("PathBuf").unwrap();
/// assert!(info.is::<PathBuf>());
/// assert!(registry.lookup_by_name("Missing").is_none());
/// ```
pub struct Registry {
    entries: TypeIdMap<StrategyEntry>,
    names: HashMap<Name, TypeId>,
    ambiguous: HashSet<Name>,
    containers: ContainerBuilders,
}

impl Default for Registry {
    /// See [`Registry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates a registry without any entry.
    pub fn empty() -> Self {
        Self {
            entries: TypeIdMap::default(),
            names: HashMap::default(),
            ambiguous: HashSet::default(),
            containers: ContainerBuilders::new(),
        }
    }

    /// Creates a registry with the predefined leaf strategies:
    ///
    /// - `PathBuf` as a string.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        provider::path::register(&mut registry);
        registry
    }

    fn index_name(&mut self, name: Name, type_id: TypeId) {
        if self.ambiguous.contains(&*name) {
            return;
        }
        match self.names.get(&*name) {
            Some(id) if *id == type_id => {}
            Some(_) => {
                log::warn!("type name `{name}` is registered by several types and no longer resolves");
                self.names.remove(&*name);
                self.ambiguous.insert(name);
            }
            None => {
                self.names.insert(name, type_id);
            }
        }
    }

    fn insert_entry(&mut self, entry: StrategyEntry) {
        let type_id = entry.info().id();
        if let Some(old) = self.entries.get(&type_id)
            && old.name() != entry.name()
            && let Some(old_name) = old.name()
        {
            log::warn!(
                "`{}` registered again under {:?}, was `{old_name}`",
                entry.info().path(),
                entry.name(),
            );
            if self.names.get(old_name) == Some(&type_id) {
                self.names.remove(old_name);
            }
        }
        if let Some(name) = entry.name() {
            self.index_name(Name::Owned(name.to_owned()), type_id);
        }
        log::debug!("registered `{}` as {:?}", entry.info().path(), entry.name());
        self.entries.insert(type_id, entry);
    }

    /// Registers `T` with the declared name and default strategies.
    #[inline]
    pub fn register<T: Typed>(&mut self) -> &mut Self {
        self.register_info(T::type_info(), Registration::new())
    }

    /// Registers `T`, overwriting any previous registration.
    #[inline]
    pub fn register_type<T: Typed>(&mut self, registration: Registration) -> &mut Self {
        self.register_info(T::type_info(), registration)
    }

    /// Registers a type by its descriptor, overwriting any previous registration.
    pub fn register_info(
        &mut self,
        info: &'static TypeInfo,
        registration: Registration,
    ) -> &mut Self {
        let default = Strategy::default_for(info);
        let strategy = Strategy::new(
            registration.encode_fn().unwrap_or(default.encode),
            registration.decode_fn().unwrap_or(default.decode),
        );
        self.insert_entry(StrategyEntry::new(
            info,
            registration.resolved_name(info),
            strategy,
        ));
        self
    }

    /// Registers the encode half of `T`.
    ///
    /// An existing decode half is kept, otherwise decoding `T` fails with
    /// [`Error::UnableFromDict`].
    #[inline]
    pub fn mark_encode_only<T: Typed>(&mut self, registration: Registration) -> &mut Self {
        self.mark_encode_only_info(T::type_info(), registration)
    }

    pub fn mark_encode_only_info(
        &mut self,
        info: &'static TypeInfo,
        registration: Registration,
    ) -> &mut Self {
        let encode = registration
            .encode_fn()
            .unwrap_or(Strategy::default_for(info).encode);
        let decode = match self.entries.get(&info.id()) {
            Some(entry) => entry.decode(),
            None => provider::unable_from_dict,
        };
        self.insert_entry(StrategyEntry::new(
            info,
            registration.resolved_name(info),
            Strategy::new(encode, decode),
        ));
        self
    }

    /// Registers the decode half of `T`.
    ///
    /// An existing encode half is kept, otherwise encoding `T` fails with
    /// [`Error::UnableToDict`].
    #[inline]
    pub fn mark_decode_only<T: Typed>(&mut self, registration: Registration) -> &mut Self {
        self.mark_decode_only_info(T::type_info(), registration)
    }

    pub fn mark_decode_only_info(
        &mut self,
        info: &'static TypeInfo,
        registration: Registration,
    ) -> &mut Self {
        let decode = registration
            .decode_fn()
            .unwrap_or(Strategy::default_for(info).decode);
        let encode = match self.entries.get(&info.id()) {
            Some(entry) => entry.encode(),
            None => provider::unable_to_dict,
        };
        self.insert_entry(StrategyEntry::new(
            info,
            registration.resolved_name(info),
            Strategy::new(encode, decode),
        ));
        self
    }

    /// Registers every type submitted with `#[autodict(dictable)]` or
    /// `#[autodict(auto_register)]`.
    ///
    /// Repeated calls overwrite the same entries. Returns `false` when the
    /// `auto_register` feature is disabled.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use autodict_core::registry::Registry;
    ///
    /// let mut registry = Registry::new();
    /// assert!(registry.auto_register());
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register::AutoRegistration;

            for registration in inventory::iter::<AutoRegistration> {
                (registration.0)(self);
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Checks that every [`Ty::Ref`] declared by a registered type resolves.
    ///
    /// Call it once all types are registered, so that forward references fail
    /// at start-up instead of during the first conversion.
    pub fn validate(&self) -> Result<(), Error> {
        for entry in self.entries.values() {
            let info = entry.info();
            let localize = |field: &str| {
                let owner = info.name();
                let field = field.to_owned();
                move |e: Error| e.in_field(owner, field)
            };
            match info.shape() {
                Shape::Record(record) => {
                    for field in record.fields() {
                        self.check_ty(field.ty()).map_err(localize(field.name()))?;
                    }
                }
                Shape::Tuple(tuple) => {
                    for field in tuple.fields() {
                        self.check_ty(field.ty()).map_err(localize(field.name()))?;
                    }
                }
                Shape::Object(object) => {
                    for (name, ty) in object.annotations() {
                        self.check_ty(ty).map_err(localize(*name))?;
                    }
                }
                Shape::Enum(_) | Shape::Opaque => {}
            }
        }
        Ok(())
    }

    fn check_ty(&self, ty: &Ty) -> Result<(), Error> {
        match ty {
            Ty::Ref(name) => self.resolve(name).map(|_| ()),
            Ty::Container {
                args: Some(args), ..
            }
            | Ty::Union(args) => args.iter().try_for_each(|ty| self.check_ty(ty)),
            _ => Ok(()),
        }
    }

    /// Resolves a type reference by name.
    pub fn resolve(&self, name: &str) -> Result<&'static TypeInfo, Error> {
        self.lookup_by_name(name)
            .ok_or_else(|| Error::UnresolvedReference(Name::Owned(name.to_owned())))
    }

    /// Returns the type registered under `name`.
    ///
    /// `None` if the name is unknown or ambiguous.
    pub fn lookup_by_name(&self, name: &str) -> Option<&'static TypeInfo> {
        self.names
            .get(name)
            .and_then(|id| self.entries.get(id))
            .map(StrategyEntry::info)
    }

    #[inline]
    pub fn is_registered(&self, type_id: TypeId) -> bool {
        self.entries.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&StrategyEntry> {
        self.entries.get(&type_id)
    }

    /// Returns the registered name of a type.
    pub fn name_of(&self, type_id: TypeId) -> Option<&str> {
        self.get(type_id).and_then(StrategyEntry::name)
    }

    /// Returns `true` if `name` was claimed by more than one type.
    #[inline]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous.contains(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &StrategyEntry> {
        self.entries.values()
    }

    #[inline]
    pub fn containers(&self) -> &ContainerBuilders {
        &self.containers
    }

    #[inline]
    pub fn containers_mut(&mut self) -> &mut ContainerBuilders {
        &mut self.containers
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::path::PathBuf;

    use super::Registry;
    use crate::info::{Shape, Ty, TypeInfo, TypeInfoCell, Typed};
    use crate::registry::Registration;
    use crate::{Error, Object, Options, Value};

    #[derive(Clone, PartialEq, Debug)]
    struct Alpha;

    #[derive(Clone, PartialEq, Debug)]
    struct Beta;

    impl Typed for Alpha {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::new::<Self>("Alpha", Shape::Opaque))
        }
    }

    impl Typed for Beta {
        fn type_info() -> &'static TypeInfo {
            static CELL: TypeInfoCell = TypeInfoCell::new();
            CELL.get_or_init(|| TypeInfo::new::<Self>("Beta", Shape::Opaque))
        }
    }

    fn encode_alpha(_: &dyn Object, _: &Options) -> Result<Value, Error> {
        Ok(Value::Str("alpha".into()))
    }

    fn decode_alpha(_: &'static TypeInfo, _: Value, _: &Options) -> Result<Value, Error> {
        Ok(Value::object(Alpha))
    }

    #[test]
    fn lookup_and_names() {
        let mut registry = Registry::empty();
        registry
            .register::<Alpha>()
            .register_type::<Beta>(Registration::new().name("b"));

        assert!(registry.is_registered(TypeId::of::<Alpha>()));
        assert_eq!(registry.name_of(TypeId::of::<Beta>()), Some("b"));
        assert!(registry.lookup_by_name("Beta").is_none());
        assert_eq!(registry.lookup_by_name("b"), Some(Beta::type_info()));
        assert!(!registry.is_registered(TypeId::of::<PathBuf>()));
    }

    #[test]
    fn renaming_drops_the_old_name() {
        let mut registry = Registry::empty();
        registry.register::<Alpha>();
        registry.register_type::<Alpha>(Registration::new().name("a"));
        assert!(registry.lookup_by_name("Alpha").is_none());
        assert_eq!(registry.lookup_by_name("a"), Some(Alpha::type_info()));

        registry.register_type::<Alpha>(Registration::new().unnamed());
        assert!(registry.lookup_by_name("a").is_none());
        assert_eq!(registry.name_of(TypeId::of::<Alpha>()), None);
    }

    #[test]
    fn conflicting_names_become_ambiguous() {
        let mut registry = Registry::empty();
        registry
            .register_type::<Alpha>(Registration::new().name("same"))
            .register_type::<Beta>(Registration::new().name("same"));
        assert!(registry.is_ambiguous("same"));
        assert!(registry.lookup_by_name("same").is_none());
    }

    #[test]
    fn partial_registrations_merge() {
        let mut registry = Registry::empty();
        registry.mark_encode_only::<Alpha>(Registration::new().encode(encode_alpha));
        let entry = registry.get(TypeId::of::<Alpha>()).unwrap();
        let err = (entry.decode())(Alpha::type_info(), Value::Null, &Options::new()).unwrap_err();
        assert!(matches!(err, Error::UnableFromDict(name) if name == "Alpha"));

        registry.mark_decode_only::<Alpha>(Registration::new().decode(decode_alpha));
        let entry = registry.get(TypeId::of::<Alpha>()).unwrap();
        let encoded = (entry.encode())(&Alpha, &Options::new()).unwrap();
        assert_eq!(encoded, Value::Str("alpha".into()));
        let decoded = (entry.decode())(Alpha::type_info(), encoded, &Options::new()).unwrap();
        assert_eq!(decoded, Value::object(Alpha));
    }

    #[test]
    fn validate_reports_unresolved_references() {
        #[derive(Clone, PartialEq, Debug)]
        struct Holder;

        impl Typed for Holder {
            fn type_info() -> &'static TypeInfo {
                static CELL: TypeInfoCell = TypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::new::<Self>(
                        "Holder",
                        Shape::Tuple(crate::info::TupleInfo::new(
                            vec![crate::info::TupleField::new(
                                "child",
                                Ty::optional(Ty::by_name("Alpha")),
                            )],
                            |_| Ok(vec![Value::Null]),
                            |_| Ok(Box::new(Holder)),
                        )),
                    )
                })
            }
        }

        let mut registry = Registry::empty();
        registry.register::<Holder>();
        let err = registry.validate().unwrap_err();
        assert_eq!(err.field_path(), ["child"]);
        assert!(matches!(err.root(), Error::UnresolvedReference(name) if name == "Alpha"));

        registry.register::<Alpha>();
        assert!(registry.validate().is_ok());
    }
}
