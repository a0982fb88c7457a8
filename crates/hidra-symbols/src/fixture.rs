//! JSON graph fixtures.
//!
//! A fixture describes a small class/interface lattice by name:
//!
//! ```json
//! {
//!   "assemblies": [{ "name": "App", "source": true }],
//!   "types": [
//!     { "name": "Base", "members": [
//!         { "kind": "method", "name": "M", "params": ["int32"], "modifiers": ["virtual"] } ] },
//!     { "name": "Derived", "base": "Base", "members": [
//!         { "kind": "method", "name": "M", "params": ["int32"], "modifiers": ["override"] } ] }
//!   ]
//! }
//! ```
//!
//! Types are processed in order and may only refer to types declared before
//! them. Members are keyed `Type.Name` unless they carry an explicit `key`
//! (needed for overloads); property and event accessors are keyed
//! `<member key>.get`, `.set`, `.add` and `.remove`.

use crate::builder::{
    AssemblyOptions, EventDecl, GraphBuilder, MethodDecl, PropertyDecl, TypeDecl,
};
use crate::ids::{AssemblyId, MemberId, TypeDefId};
use crate::member::{Accessibility, MemberFlags, MethodKind};
use crate::member_graph::MemberGraph;
use crate::type_def::TypeKind;
use crate::types::{CustomModifier, PrimitiveType, RefKind, SigType, TypeSig};
use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

// =============================================================================
// Fixture schema
// =============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GraphFixture {
    #[serde(default)]
    pub assemblies: Vec<AssemblySpec>,
    #[serde(default)]
    pub types: Vec<TypeSpec>,
    #[serde(default)]
    pub hints: Vec<HintSpec>,
    /// Resolver options, passed through uninterpreted.
    #[serde(default)]
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblySpec {
    pub name: String,
    #[serde(default = "default_true")]
    pub source: bool,
    #[serde(default)]
    pub covariant_returns: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeSpec {
    pub name: String,
    /// Lookup key; defaults to `name`.
    #[serde(default)]
    pub key: Option<String>,
    /// Assembly name; defaults to the first assembly.
    #[serde(default)]
    pub assembly: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub arity: u32,
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberSpec>,
    /// Makes this entry an instantiation of the named generic definition.
    #[serde(default)]
    pub construct: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemberSpec {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub accessibility: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub metadata_virtual: Option<bool>,
    /// `methodKind` of a method (`ordinary`, `constructor`, `operator`, ...).
    #[serde(default)]
    pub method_kind: Option<String>,
    #[serde(default)]
    pub type_params: u32,
    #[serde(default)]
    pub params: Vec<SigSpec>,
    #[serde(default)]
    pub returns: Option<SigSpec>,
    /// Property, event and field type; nested type key for `type` members.
    #[serde(default, rename = "type")]
    pub ty: Option<SigSpec>,
    #[serde(default)]
    pub get: bool,
    #[serde(default)]
    pub set: bool,
    #[serde(default)]
    pub set_accessibility: Option<String>,
    #[serde(default)]
    pub indexer: bool,
    #[serde(default)]
    pub indexed_property: bool,
}

/// A signature type: either `"int32"`, `"ref Base"`, or the long form with
/// custom modifiers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SigSpec {
    Short(String),
    Full(FullSigSpec),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullSigSpec {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "ref")]
    pub ref_kind: Option<String>,
    /// Required modifiers on the type, by type key.
    #[serde(default)]
    pub modreq: Vec<String>,
    #[serde(default)]
    pub modopt: Vec<String>,
    #[serde(default)]
    pub ref_modreq: Vec<String>,
    #[serde(default)]
    pub ref_modopt: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintSpec {
    pub method: String,
    pub target: String,
}

// =============================================================================
// Loading
// =============================================================================

/// A graph built from a fixture, with its name tables.
pub struct FixtureGraph {
    pub graph: MemberGraph,
    pub types: FxHashMap<String, TypeDefId>,
    pub members: FxHashMap<String, MemberId>,
    pub options: Option<serde_json::Value>,
}

impl std::fmt::Debug for FixtureGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureGraph")
            .field("types", &self.types.len())
            .field("members", &self.members.len())
            .finish_non_exhaustive()
    }
}

impl FixtureGraph {
    pub fn member(&self, key: &str) -> Result<MemberId> {
        self.members
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("fixture has no member '{key}'"))
    }

    pub fn type_id(&self, key: &str) -> Result<TypeDefId> {
        self.types
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("fixture has no type '{key}'"))
    }

    /// Reverse lookup, for readable assertions.
    pub fn member_key(&self, id: MemberId) -> Option<&str> {
        self.members
            .iter()
            .find(|(_, m)| **m == id)
            .map(|(k, _)| k.as_str())
    }
}

impl MemberGraph {
    pub fn from_fixture_str(source: &str) -> Result<FixtureGraph> {
        let fixture: GraphFixture =
            serde_json::from_str(source).context("failed to parse graph fixture JSON")?;
        fixture.build()
    }

    pub fn load_fixture(path: &Path) -> Result<FixtureGraph> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read graph fixture: {}", path.display()))?;
        Self::from_fixture_str(&source)
            .with_context(|| format!("failed to load graph fixture: {}", path.display()))
    }
}

impl GraphFixture {
    pub fn build(self) -> Result<FixtureGraph> {
        let mut loader = Loader {
            builder: GraphBuilder::new(),
            assemblies: FxHashMap::default(),
            first_assembly: None,
            types: FxHashMap::default(),
            members: FxHashMap::default(),
        };
        for asm in &self.assemblies {
            loader.add_assembly(asm)?;
        }
        for ty in &self.types {
            loader
                .add_type(ty)
                .with_context(|| format!("in type '{}'", ty.key.as_deref().unwrap_or(ty.name.as_str())))?;
        }
        for hint in &self.hints {
            let method = loader.member(&hint.method)?;
            let target = loader.member(&hint.target)?;
            loader.builder.set_override_hint(method, target);
        }

        let Loader {
            builder,
            types,
            members,
            ..
        } = loader;
        let graph = builder.finish().context("invalid graph fixture")?;
        debug!(
            types = types.len(),
            members = members.len(),
            "GraphFixture::build"
        );
        Ok(FixtureGraph {
            graph,
            types,
            members,
            options: self.options,
        })
    }
}

struct Loader {
    builder: GraphBuilder,
    assemblies: FxHashMap<String, AssemblyId>,
    first_assembly: Option<AssemblyId>,
    types: FxHashMap<String, TypeDefId>,
    members: FxHashMap<String, MemberId>,
}

impl Loader {
    fn add_assembly(&mut self, spec: &AssemblySpec) -> Result<()> {
        let mut options = if spec.source {
            AssemblyOptions::source()
        } else {
            AssemblyOptions::metadata()
        };
        if spec.covariant_returns {
            options = options.with_covariant_returns();
        }
        let id = self.builder.add_assembly(&spec.name, options);
        if self.assemblies.insert(spec.name.clone(), id).is_some() {
            bail!("duplicate assembly '{}'", spec.name);
        }
        self.first_assembly.get_or_insert(id);
        Ok(())
    }

    fn assembly(&mut self, name: Option<&str>) -> Result<AssemblyId> {
        match name {
            Some(name) => self
                .assemblies
                .get(name)
                .copied()
                .ok_or_else(|| anyhow!("unknown assembly '{name}'")),
            None => match self.first_assembly {
                Some(id) => Ok(id),
                None => {
                    // Fixtures without assemblies get an implicit source one.
                    let id = self.builder.add_assembly("", AssemblyOptions::source());
                    self.first_assembly = Some(id);
                    Ok(id)
                }
            },
        }
    }

    fn type_ref(&self, key: &str) -> Result<TypeDefId> {
        self.types
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("unknown type '{key}' (types must be declared before use)"))
    }

    fn member(&self, key: &str) -> Result<MemberId> {
        self.members
            .get(key)
            .copied()
            .ok_or_else(|| anyhow!("unknown member '{key}'"))
    }

    fn register_type(&mut self, key: String, id: TypeDefId) -> Result<()> {
        if self.types.insert(key.clone(), id).is_some() {
            bail!("duplicate type key '{key}'");
        }
        Ok(())
    }

    fn register_member(&mut self, key: String, id: MemberId) -> Result<()> {
        if self.members.insert(key.clone(), id).is_some() {
            bail!("duplicate member key '{key}'; give overloads an explicit \"key\"");
        }
        Ok(())
    }

    fn add_type(&mut self, spec: &TypeSpec) -> Result<()> {
        let key = spec.key.clone().unwrap_or_else(|| spec.name.clone());

        if let Some(definition) = &spec.construct {
            let definition = self.type_ref(definition)?;
            let args = spec
                .args
                .iter()
                .map(|a| self.parse_type(a))
                .collect::<Result<Vec<_>>>()?;
            let id = self.builder.construct_type(definition, args)?;
            return self.register_type(key, id);
        }

        let assembly = self.assembly(spec.assembly.as_deref())?;
        let mut decl = TypeDecl::new(&spec.name, parse_type_kind(spec.kind.as_deref())?)
            .arity(spec.arity);
        if let Some(base) = &spec.base {
            decl = decl.base(self.type_ref(base)?);
        }
        let interfaces = spec
            .interfaces
            .iter()
            .map(|i| self.type_ref(i))
            .collect::<Result<Vec<_>>>()?;
        decl = decl.interfaces(&interfaces);

        let id = self.builder.add_type(assembly, decl);
        self.register_type(key.clone(), id)?;
        for member in &spec.members {
            self.add_member(id, &key, member)
                .with_context(|| format!("in member '{}'", member.name))?;
        }
        Ok(())
    }

    fn add_member(&mut self, ty: TypeDefId, type_key: &str, spec: &MemberSpec) -> Result<()> {
        let key = spec
            .key
            .clone()
            .unwrap_or_else(|| format!("{type_key}.{}", spec.name));
        let accessibility = parse_accessibility(spec.accessibility.as_deref())?;
        let flags = parse_flags(&spec.modifiers)?;

        match spec.kind.as_str() {
            "method" => {
                let mut decl = MethodDecl::new(&spec.name)
                    .kind(parse_method_kind(spec.method_kind.as_deref())?)
                    .type_params(spec.type_params)
                    .flags(flags)
                    .accessibility(accessibility);
                for param in &spec.params {
                    decl = decl.param(self.parse_sig(param)?);
                }
                if let Some(ret) = &spec.returns {
                    decl = decl.returns(self.parse_sig(ret)?);
                }
                if let Some(value) = spec.metadata_virtual {
                    decl = decl.metadata_virtual(value);
                }
                let id = self.builder.add_method(ty, decl);
                self.register_member(key, id)
            }
            "property" => {
                let prop_ty = self.required_sig(spec)?;
                let params = spec
                    .params
                    .iter()
                    .map(|p| self.parse_sig(p))
                    .collect::<Result<Vec<_>>>()?;
                let mut decl = if spec.indexer {
                    PropertyDecl::indexer(prop_ty, params)
                } else if spec.indexed_property {
                    PropertyDecl::indexed_property(&spec.name, prop_ty, params)
                } else {
                    PropertyDecl::new(&spec.name, prop_ty)
                };
                decl = decl.flags(flags).accessibility(accessibility);
                if spec.get {
                    decl = decl.getter();
                }
                if let Some(setter) = &spec.set_accessibility {
                    decl = decl.setter_accessibility(parse_accessibility(Some(setter))?);
                } else if spec.set {
                    decl = decl.setter();
                }
                let handle = self.builder.add_property(ty, decl);
                self.register_member(key.clone(), handle.property)?;
                if let Some(getter) = handle.getter {
                    self.register_member(format!("{key}.get"), getter)?;
                }
                if let Some(setter) = handle.setter {
                    self.register_member(format!("{key}.set"), setter)?;
                }
                Ok(())
            }
            "event" => {
                let event_ty = self.required_sig(spec)?;
                let decl = EventDecl::new(&spec.name, event_ty)
                    .flags(flags)
                    .accessibility(accessibility);
                let handle = self.builder.add_event(ty, decl);
                self.register_member(key.clone(), handle.event)?;
                self.register_member(format!("{key}.add"), handle.adder)?;
                self.register_member(format!("{key}.remove"), handle.remover)
            }
            "field" => {
                let field_ty = self.required_sig(spec)?;
                let id = self
                    .builder
                    .add_field(ty, &spec.name, field_ty, accessibility, flags);
                self.register_member(key, id)
            }
            "type" => {
                let nested = match &spec.ty {
                    Some(SigSpec::Short(nested)) => self.type_ref(nested)?,
                    _ => bail!("nested type member needs \"type\": \"<type key>\""),
                };
                let id = self.builder.add_nested_type(ty, nested, accessibility);
                self.register_member(key, id)
            }
            other => bail!("unsupported member kind '{other}'"),
        }
    }

    fn required_sig(&self, spec: &MemberSpec) -> Result<SigType> {
        match &spec.ty {
            Some(sig) => self.parse_sig(sig),
            None => bail!("{} '{}' needs a \"type\"", spec.kind, spec.name),
        }
    }

    fn parse_sig(&self, spec: &SigSpec) -> Result<SigType> {
        match spec {
            SigSpec::Short(text) => {
                let (ref_kind, rest) = split_ref_prefix(text);
                Ok(SigType::new(self.parse_type(rest)?).by_ref(ref_kind))
            }
            SigSpec::Full(full) => {
                let ref_kind = match full.ref_kind.as_deref() {
                    None => RefKind::None,
                    Some(kind) => parse_ref_kind(kind)?,
                };
                let mut sig = SigType::new(self.parse_type(&full.ty)?).by_ref(ref_kind);
                for m in &full.modreq {
                    sig = sig.with_modifier(CustomModifier::required(self.type_ref(m)?));
                }
                for m in &full.modopt {
                    sig = sig.with_modifier(CustomModifier::optional(self.type_ref(m)?));
                }
                for m in &full.ref_modreq {
                    sig = sig.with_ref_modifier(CustomModifier::required(self.type_ref(m)?));
                }
                for m in &full.ref_modopt {
                    sig = sig.with_ref_modifier(CustomModifier::optional(self.type_ref(m)?));
                }
                Ok(sig)
            }
        }
    }

    fn parse_type(&self, text: &str) -> Result<TypeSig> {
        let mut parser = TypeParser {
            text,
            pos: 0,
            loader: self,
        };
        let ty = parser.parse()?;
        parser.skip_ws();
        if parser.pos != text.len() {
            bail!("unexpected '{}' in type '{text}'", &text[parser.pos..]);
        }
        Ok(ty)
    }
}

// =============================================================================
// Type syntax
// =============================================================================

/// Parses `int32`, `!0`, `!!1`, `Base`, `List<!0>`, `int32[]`, `int32[,]`,
/// `uint8*`. Named types are resolved by fixture key to their definition.
struct TypeParser<'a> {
    text: &'a str,
    pos: usize,
    loader: &'a Loader,
}

impl<'a> TypeParser<'a> {
    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.text.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<u32> {
        let digits: String = self.rest().chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            bail!("expected a type parameter index in '{}'", self.text);
        }
        self.pos += digits.len();
        Ok(digits.parse()?)
    }

    fn identifier(&mut self) -> Result<&'a str> {
        self.skip_ws();
        let text = self.text;
        let start = self.pos;
        let len: usize = self
            .rest()
            .chars()
            .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '`'))
            .map(char::len_utf8)
            .sum();
        if len == 0 {
            bail!("expected a type name in '{}'", self.text);
        }
        self.pos += len;
        Ok(&text[start..self.pos])
    }

    fn parse(&mut self) -> Result<TypeSig> {
        let mut ty = self.parse_element()?;
        loop {
            if self.eat("[") {
                let mut rank = 1;
                while self.eat(",") {
                    rank += 1;
                }
                if !self.eat("]") {
                    bail!("unterminated array type in '{}'", self.text);
                }
                ty = TypeSig::Array {
                    element: Box::new(ty),
                    rank,
                };
            } else if self.eat("*") {
                ty = TypeSig::Pointer(Box::new(ty));
            } else {
                return Ok(ty);
            }
        }
    }

    fn parse_element(&mut self) -> Result<TypeSig> {
        if self.eat("!!") {
            return Ok(TypeSig::MethodTypeParam(self.number()?));
        }
        if self.eat("!") {
            return Ok(TypeSig::TypeParam(self.number()?));
        }
        for keyword in ["native int", "native uint"] {
            if self.eat(keyword) {
                return PrimitiveType::from_keyword(keyword)
                    .map(TypeSig::Primitive)
                    .ok_or_else(|| anyhow!("unknown keyword '{keyword}'"));
            }
        }

        let name = self.identifier()?;
        if name == "void" {
            return Ok(TypeSig::Void);
        }
        if let Some(primitive) = PrimitiveType::from_keyword(name) {
            return Ok(TypeSig::Primitive(primitive));
        }
        let def = self.loader.type_ref(name)?;

        let mut args = Vec::new();
        if self.eat("<") {
            loop {
                args.push(self.parse()?);
                if self.eat(">") {
                    break;
                }
                if !self.eat(",") {
                    bail!("expected ',' or '>' in '{}'", self.text);
                }
            }
        }
        Ok(TypeSig::generic(def, args))
    }
}

fn split_ref_prefix(text: &str) -> (RefKind, &str) {
    let text = text.trim();
    for (prefix, kind) in [("ref ", RefKind::Ref), ("out ", RefKind::Out), ("in ", RefKind::In)] {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (kind, rest);
        }
    }
    (RefKind::None, text)
}

fn parse_ref_kind(value: &str) -> Result<RefKind> {
    Ok(match value {
        "none" => RefKind::None,
        "ref" => RefKind::Ref,
        "out" => RefKind::Out,
        "in" => RefKind::In,
        _ => bail!("unsupported ref kind '{value}'"),
    })
}

fn parse_type_kind(value: Option<&str>) -> Result<TypeKind> {
    Ok(match value.unwrap_or("class") {
        "class" => TypeKind::Class,
        "struct" => TypeKind::Struct,
        "interface" => TypeKind::Interface,
        "delegate" => TypeKind::Delegate,
        other => bail!("unsupported type kind '{other}'"),
    })
}

fn parse_accessibility(value: Option<&str>) -> Result<Accessibility> {
    Ok(match value.unwrap_or("public") {
        "public" => Accessibility::Public,
        "internal" => Accessibility::Internal,
        "protected" => Accessibility::Protected,
        "protectedInternal" => Accessibility::ProtectedOrInternal,
        "privateProtected" => Accessibility::ProtectedAndInternal,
        "private" => Accessibility::Private,
        other => bail!("unsupported accessibility '{other}'"),
    })
}

fn parse_flags(modifiers: &[String]) -> Result<MemberFlags> {
    let mut flags = MemberFlags::empty();
    for modifier in modifiers {
        flags |= match modifier.as_str() {
            "static" => MemberFlags::STATIC,
            "virtual" => MemberFlags::VIRTUAL,
            "abstract" => MemberFlags::ABSTRACT,
            "override" => MemberFlags::OVERRIDE,
            "sealed" => MemberFlags::SEALED,
            // `new` only silences a diagnostic; it has no effect on resolution.
            "new" => MemberFlags::empty(),
            other => bail!("unsupported modifier '{other}'"),
        };
    }
    Ok(flags)
}

fn parse_method_kind(value: Option<&str>) -> Result<MethodKind> {
    Ok(match value.unwrap_or("ordinary") {
        "ordinary" => MethodKind::Ordinary,
        "constructor" => MethodKind::Constructor,
        "staticConstructor" => MethodKind::StaticConstructor,
        "destructor" => MethodKind::Destructor,
        "operator" => MethodKind::Operator,
        "conversion" => MethodKind::Conversion,
        "explicitInterfaceImplementation" => MethodKind::ExplicitInterfaceImplementation,
        "delegateInvoke" => MethodKind::DelegateInvoke,
        other => bail!("unsupported method kind '{other}'"),
    })
}
