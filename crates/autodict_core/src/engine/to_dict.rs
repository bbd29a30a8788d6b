use crate::engine::AutoDict;
use crate::info::TypeInfo;
use crate::registry::{EncodeFn, Strategy};
use crate::value::{IntoValue, List, Map, TYPE_TAG, Value};
use crate::{Error, Options};

impl AutoDict<'_> {
    /// Converts `value` to a tree.
    ///
    /// Objects go through the strategy of their type. When `recursively` is
    /// set, the items of the result (sequence elements, mapping values) are
    /// converted too, keeping their kind and order. When `with_cls` is set,
    /// mappings encoded from a described type get the type tag.
    ///
    /// # Errors
    ///
    /// [`Error::UnableToDict`] when a type has no strategy in strict mode, or
    /// has to be tagged without a name. Strategy errors are returned as is,
    /// localized with [`Error::InField`] when raised below the top level.
    pub fn to_dict(&self, value: Value, options: &Options) -> Result<Value, Error> {
        let object = match value {
            Value::Object(object) => object,
            builtin if options.recursively => return self.encode_items(builtin, None, options),
            builtin => return Ok(builtin),
        };

        let info = object.object_type();
        let Some(encode) = self.encode_fn(info, options)? else {
            log::trace!("`{}` passed through", info.name());
            return Ok(Value::Object(object));
        };

        let mut tree = encode(&*object, options)?;
        if options.recursively {
            tree = self.encode_items(tree, Some(info), options)?;
        }
        if options.with_cls
            && let Value::Map(map) = &mut tree
        {
            let tag = self.tag_of(info)?;
            map.insert(TYPE_TAG, Value::Str(tag.to_owned()));
        }
        Ok(tree)
    }

    /// Converts a Rust value to a tree, see [`to_dict`](Self::to_dict).
    #[inline]
    pub fn encode<T: IntoValue + Clone>(&self, value: &T, options: &Options) -> Result<Value, Error> {
        self.to_dict(value.clone().into_value(), options)
    }

    /// `None` means pass-through.
    fn encode_fn(&self, info: &'static TypeInfo, options: &Options) -> Result<Option<EncodeFn>, Error> {
        if let Some(own) = info.own() {
            log::trace!("`{}` encodes itself", info.name());
            return Ok(Some(own.encode));
        }
        if let Some(entry) = self.registry.get(info.id()) {
            log::trace!("`{}` encodes with its registered strategy", info.name());
            return Ok(Some(entry.encode()));
        }
        if info.is_native() {
            log::trace!("`{}` encodes natively as {}", info.name(), info.kind());
            return Ok(Some(Strategy::default_for(info).encode));
        }
        if !options.strict {
            return Ok(None);
        }
        Err(Error::UnableToDict(info.name().into()))
    }

    /// The tag of an encoded instance: its registered name, or its declared
    /// name when it needs no registration.
    fn tag_of(&self, info: &'static TypeInfo) -> Result<&str, Error> {
        match self.registry.get(info.id()) {
            Some(entry) => entry
                .name()
                .ok_or_else(|| Error::UnableToDict(info.name().into())),
            None if info.is_native() || info.own().is_some() => Ok(info.name()),
            None => Err(Error::UnableToDict(info.name().into())),
        }
    }

    /// Converts the items of a sequence or the values of a mapping.
    ///
    /// `owner` is the type the container was encoded from, it localizes
    /// errors raised in its fields.
    fn encode_items(
        &self,
        tree: Value,
        owner: Option<&'static TypeInfo>,
        options: &Options,
    ) -> Result<Value, Error> {
        match tree {
            Value::List(list) => {
                let kind = list.kind();
                let items = list
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| {
                        self.to_dict(item, options)
                            .map_err(|e| e.in_field(kind.name(), index.to_string()))
                    })
                    .collect::<Result<_, _>>()?;
                Ok(Value::List(List::from_items(kind, items)))
            }
            Value::Map(map) => {
                let kind = map.kind();
                let context = owner.map_or(kind.name(), TypeInfo::name);
                let mut encoded = Map::with_kind(kind);
                for (key, value) in map {
                    let value = match self.to_dict(value, options) {
                        Ok(value) => value,
                        Err(e) => return Err(e.in_field(context, key)),
                    };
                    encoded.insert(key, value);
                }
                Ok(Value::Map(encoded))
            }
            other => Ok(other),
        }
    }
}
