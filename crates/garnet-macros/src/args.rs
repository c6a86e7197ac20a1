// #[method(...)] attribute arguments

use syn::meta::ParseNestedMeta;
use syn::{Expr, Ident, LitBool, LitStr, Result};

/// Parsed `#[method(...)]` properties
#[derive(Default)]
pub struct MethodArgs {
    pub name: Option<LitStr>,
    pub required: Option<Expr>,
    pub optional: Option<Expr>,
    pub rest: bool,
    pub check_arity: Option<LitBool>,
    pub visibility: Option<Ident>,
    pub module: bool,
    pub meta: bool,
    pub compat: Option<LitStr>,
    pub aliases: Vec<LitStr>,
}

impl MethodArgs {
    pub fn parse(&mut self, meta: ParseNestedMeta<'_>) -> Result<()> {
        if meta.path.is_ident("name") {
            set_once(&meta, &self.name, "name")?;
            self.name = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("required") {
            set_once(&meta, &self.required, "required")?;
            // Kept as an expression so negative counts reach the builder
            self.required = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("optional") {
            set_once(&meta, &self.optional, "optional")?;
            self.optional = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("rest") {
            self.rest = true;
        } else if meta.path.is_ident("check_arity") {
            set_once(&meta, &self.check_arity, "check_arity")?;
            self.check_arity = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("visibility") {
            set_once(&meta, &self.visibility, "visibility")?;
            let ident: Ident = meta.value()?.parse()?;
            match ident.to_string().as_str() {
                "public" | "private" | "protected" | "module_function" => {}
                _ => {
                    return Err(syn::Error::new_spanned(
                        &ident,
                        "expected one of: public, private, protected, module_function",
                    ))
                }
            }
            self.visibility = Some(ident);
        } else if meta.path.is_ident("module") {
            self.module = true;
        } else if meta.path.is_ident("meta") {
            self.meta = true;
        } else if meta.path.is_ident("compat") {
            set_once(&meta, &self.compat, "compat")?;
            self.compat = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("alias") {
            self.aliases.push(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported method property"));
        }
        Ok(())
    }
}

fn set_once<T>(meta: &ParseNestedMeta<'_>, slot: &Option<T>, key: &str) -> Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{}` property", key)));
    }
    Ok(())
}
