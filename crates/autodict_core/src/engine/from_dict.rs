use crate::container::Entry;
use crate::engine::AutoDict;
use crate::info::{Describe, Literal, Ty, TypeInfo, inspect};
use crate::registry::{DecodeFn, Strategy};
use crate::value::{FromValue, Kind, Layout, List, Map, TYPE_TAG, Value};
use crate::{Error, Options};

/// The item type when nothing is declared.
static ANY: Ty = Ty::Any;

impl AutoDict<'_> {
    /// Builds an instance of `ty` from a tree.
    ///
    /// The type tag of a mapping, when it resolves, takes precedence over
    /// `ty`, except for unions where it only settles ambiguities. When
    /// `recursively` is set, items are converted against their declared
    /// types first: record fields against their field types, container items
    /// against the type arguments, union values against each member.
    ///
    /// Pass [`Ty::Any`] to rely on the tag alone.
    ///
    /// # Errors
    ///
    /// - [`Error::UnableFromDict`]: no strategy for the target type in strict
    ///   mode, or an unknown tag with nothing else to go by.
    /// - [`Error::AmbiguousUnion`] / [`Error::NoUnionMatch`]: union trials
    ///   found several or no matches.
    /// - [`Error::LiteralMismatch`], [`Error::UnresolvedReference`], and the
    ///   errors of the strategies, localized with [`Error::InField`].
    pub fn from_dict(&self, tree: Value, ty: &Ty, options: &Options) -> Result<Value, Error> {
        let mut tree = tree;
        let tagged = match take_tag(&mut tree) {
            Some(tag) => match self.registry.lookup_by_name(&tag) {
                Some(info) => Some(info),
                None if options.strict && matches!(ty, Ty::Any) => {
                    return Err(Error::UnableFromDict(tag.into()));
                }
                None => {
                    log::debug!("type tag `{tag}` does not resolve, decoding as `{ty}`");
                    None
                }
            },
            None => None,
        };

        if let Ty::Union(members) = ty {
            return self.decode_union(tree, ty, members, tagged, options);
        }
        if let Some(info) = tagged {
            return self.decode_named(tree, info, options);
        }

        match ty {
            Ty::Named(ty) => self.decode_named(tree, ty.get(), options),
            Ty::Ref(name) => {
                let info = self.registry.resolve(name)?;
                self.decode_named(tree, info, options)
            }
            _ if !options.recursively => Ok(tree),
            Ty::Container {
                kind,
                args,
                variadic,
            } => self.decode_container(tree, *kind, args.as_deref().unwrap_or(&[]), *variadic, options),
            Ty::Literal(values) => decode_literal(tree, ty, values),
            Ty::Any | Ty::Null | Ty::Bool | Ty::Int | Ty::Float | Ty::Str | Ty::Union(_) => {
                self.decode_items(tree, &ANY, options)
            }
        }
    }

    /// Builds a Rust value from a tree, see [`from_dict`](Self::from_dict).
    ///
    /// The target type is [`Describe::describe`] of `T`.
    pub fn decode<T: FromValue + Describe>(&self, tree: Value, options: &Options) -> Result<T, Error> {
        let value = self.from_dict(tree, &T::describe(), options)?;
        T::from_value(value)
    }

    // -------------------------------------------------------------------------
    // Described types

    fn decode_named(&self, tree: Value, info: &'static TypeInfo, options: &Options) -> Result<Value, Error> {
        let tree = if options.recursively {
            self.decode_fields(tree, info, options)?
        } else {
            tree
        };

        if let Value::Object(object) = &tree
            && object.object_type() == info
        {
            return Ok(tree);
        }
        match self.decode_fn(info, options)? {
            Some(decode) => decode(info, tree, options),
            None => {
                log::trace!("`{}` passed through", info.name());
                Ok(tree)
            }
        }
    }

    /// `None` means pass-through.
    fn decode_fn(&self, info: &'static TypeInfo, options: &Options) -> Result<Option<DecodeFn>, Error> {
        if let Some(own) = info.own() {
            log::trace!("`{}` decodes itself", info.name());
            return Ok(Some(own.decode));
        }
        if let Some(entry) = self.registry.get(info.id()) {
            log::trace!("`{}` decodes with its registered strategy", info.name());
            return Ok(Some(entry.decode()));
        }
        if info.is_native() {
            log::trace!("`{}` decodes natively as {}", info.name(), info.kind());
            return Ok(Some(Strategy::default_for(info).decode));
        }
        if !options.strict {
            return Ok(None);
        }
        Err(Error::UnableFromDict(info.name().into()))
    }

    /// Converts the fields of a record-like tree against their declared types.
    ///
    /// Named tuples also accept a positional list. Keys without a declared
    /// type, and trees of other types, are converted without expectation.
    fn decode_fields(&self, tree: Value, info: &'static TypeInfo, options: &Options) -> Result<Value, Error> {
        if !inspect::is_record_like_info(info) {
            return self.decode_items(tree, &ANY, options);
        }
        match tree {
            Value::Map(map) => {
                let mut decoded = Map::with_kind(map.kind());
                for (key, value) in map {
                    let ty = inspect::field_type(info, &key).unwrap_or(&ANY);
                    let value = match self.from_dict(value, ty, options) {
                        Ok(value) => value,
                        Err(e) => return Err(e.in_field(info.name(), key)),
                    };
                    decoded.insert(key, value);
                }
                Ok(Value::Map(decoded))
            }
            Value::List(list) => match info.as_tuple() {
                Some(tuple) => {
                    let kind = list.kind();
                    let items = list
                        .into_iter()
                        .enumerate()
                        .map(|(index, item)| {
                            let field = tuple.fields().get(index);
                            let ty = field.map_or(&ANY, |field| field.ty());
                            self.from_dict(item, ty, options).map_err(|e| {
                                let name = field.map_or_else(|| index.to_string(), |f| f.name().to_owned());
                                e.in_field(info.name(), name)
                            })
                        })
                        .collect::<Result<_, _>>()?;
                    Ok(Value::List(List::from_items(kind, items)))
                }
                None => self.decode_items(Value::List(list), &ANY, options),
            },
            other => Ok(other),
        }
    }

    // -------------------------------------------------------------------------
    // Built-in types

    /// Converts every item of a sequence, or every value of a mapping, against
    /// `item`. Kinds and order are kept.
    fn decode_items(&self, tree: Value, item: &Ty, options: &Options) -> Result<Value, Error> {
        match tree {
            Value::List(list) => {
                let kind = list.kind();
                let items = list
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| {
                        self.from_dict(value, item, options)
                            .map_err(|e| e.in_field(kind.name(), index.to_string()))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Value::List(List::from_items(kind, items)))
            }
            Value::Map(map) => {
                let kind = map.kind();
                let mut decoded = Map::with_kind(kind);
                for (key, value) in map {
                    let value = match self.from_dict(value, item, options) {
                        Ok(value) => value,
                        Err(e) => return Err(e.in_field(kind.name(), key)),
                    };
                    decoded.insert(key, value);
                }
                Ok(Value::Map(decoded))
            }
            other => Ok(other),
        }
    }

    /// Converts the items of a container against the type arguments, then
    /// rebuilds it with the builder of the declared kind.
    fn decode_container(
        &self,
        tree: Value,
        kind: Kind,
        args: &[Ty],
        variadic: bool,
        options: &Options,
    ) -> Result<Value, Error> {
        let builders = self.registry.containers();
        match tree {
            Value::Map(map) if kind.layout() == Layout::Map => {
                let value_ty = args.get(1).unwrap_or(&ANY);
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let value = match self.from_dict(value, value_ty, options) {
                        Ok(value) => value,
                        Err(e) => return Err(e.in_field(kind.name(), key)),
                    };
                    entries.push(Entry::Pair(key, value));
                }
                builders.build(kind, entries, [])
            }
            Value::List(list) => {
                let entries = list
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        self.from_dict(item, item_type(kind, args, variadic, index), options)
                            .map(Entry::Item)
                            .map_err(|e| e.in_field(kind.name(), index.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                builders.build(kind, entries, [])
            }
            other if options.strict => Err(Error::mismatch(kind.name(), other.kind_name())),
            other => Ok(other),
        }
    }

    /// Tries every member that could describe the value.
    ///
    /// Exactly one success wins. Several successes are ambiguous unless the
    /// tree was tagged with exactly one of the successful members.
    fn decode_union(
        &self,
        tree: Value,
        ty: &Ty,
        members: &[Ty],
        tagged: Option<&'static TypeInfo>,
        options: &Options,
    ) -> Result<Value, Error> {
        if !options.recursively {
            return Ok(tree);
        }

        let mut candidates: Vec<&Ty> = members
            .iter()
            .filter(|m| inspect::accepts_kind(m, &tree))
            .collect();
        // An integer widens to a float member only when nothing takes it as is.
        if candidates.is_empty() && matches!(tree, Value::Int(_)) {
            candidates = members.iter().filter(|m| matches!(m, Ty::Float)).collect();
        }

        let mut matches: Vec<(&Ty, Value)> = Vec::new();
        let mut last_error = None;
        for member in candidates {
            match self.from_dict(tree.clone(), member, options) {
                Ok(value) => matches.push((member, value)),
                Err(e) => {
                    log::trace!("`{member}` rejected the value: {e}");
                    last_error = Some(e);
                }
            }
        }

        if matches.len() > 1
            && let Some(info) = tagged
        {
            let tagged_matches: Vec<usize> = matches
                .iter()
                .enumerate()
                .filter(|(_, (member, _))| self.names(member, info))
                .map(|(index, _)| index)
                .collect();
            if let &[index] = tagged_matches.as_slice() {
                return Ok(matches.swap_remove(index).1);
            }
        }
        if matches.len() > 1 {
            return Err(Error::AmbiguousUnion {
                ty: ty.to_string(),
                matches: matches.iter().map(|(member, _)| member.to_string()).collect(),
            });
        }
        match matches.pop() {
            Some((_, value)) => Ok(value),
            None => Err(last_error.unwrap_or_else(|| Error::NoUnionMatch {
                ty: ty.to_string(),
                found: tree.kind_name(),
            })),
        }
    }

    /// Returns `true` if `member` is the described type `info`.
    fn names(&self, member: &Ty, info: &'static TypeInfo) -> bool {
        match member {
            Ty::Named(ty) => ty.get() == info,
            Ty::Ref(name) => self.registry.lookup_by_name(name) == Some(info),
            _ => false,
        }
    }
}

/// The declared type of the item at `index` of a container.
fn item_type(kind: Kind, args: &[Ty], variadic: bool, index: usize) -> &Ty {
    match kind.layout() {
        Layout::Map => &ANY,
        _ if kind == Kind::TUPLE && variadic => args.get(index).or(args.last()).unwrap_or(&ANY),
        _ if kind == Kind::TUPLE => args.get(index).unwrap_or(&ANY),
        Layout::Seq | Layout::Set => args.first().unwrap_or(&ANY),
    }
}

/// Removes the type tag from a mapping.
fn take_tag(tree: &mut Value) -> Option<String> {
    match tree.as_map_mut()?.remove(TYPE_TAG)? {
        Value::Str(tag) => Some(tag),
        other => {
            log::debug!("ignoring type tag {other}, not a string");
            None
        }
    }
}

fn decode_literal(tree: Value, ty: &Ty, values: &[Literal]) -> Result<Value, Error> {
    if values.iter().any(|value| value.matches(&tree)) {
        return Ok(tree);
    }
    Err(Error::LiteralMismatch {
        value: tree.to_string(),
        allowed: ty.to_string(),
    })
}
