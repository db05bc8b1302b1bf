use crate::base::{expected_error, unexpected_error, Parser};
use crate::{Expectation, Result};
use ast::{
    BareDecl, BareTy, ClassDecl, CtorDecl, Decl, EnumDecl, ExtensionDecl, FuncDecl, InitDecl,
    InterfaceDecl, LetDecl, ModuleDecl, Package, TyBound, TypealiasDecl,
};
use lexer::token::BareToken::{self, *};
use span::{Span, Spanned};

impl Parser {
    /// Parse a declaration.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Decl ::= Attr* Access? Bare-Decl
    /// Bare-Decl ::=
    ///     | Module-Decl | Open-Decl
    ///     | Class-Decl | Enum-Decl | Typealias-Decl | Interface-Decl | Extension-Decl
    ///     | Let-Decl | Func-Decl | Init-Decl | Ctor-Decl
    /// ```
    pub(crate) fn parse_decl(&mut self) -> Result<Decl> {
        let attrs = self.parse_attrs()?;
        let access = self.parse_access()?;
        let token = self.peek()?;
        let mut decl = match token.bare {
            Module => self.parse_module_decl()?,
            Open => self.parse_open_decl()?,
            Class => self.parse_class_decl()?,
            Enum => self.parse_enum_decl()?,
            Type => self.parse_typealias_decl()?,
            Interface => self.parse_interface_decl()?,
            Extension => self.parse_extension_decl()?,
            Let => self.parse_let_decl()?,
            Func => self.parse_func_decl()?,
            Init => self.parse_init_decl()?,
            Case => self.parse_ctor_decl()?,
            _ => return Err(unexpected_error("declaration", token)),
        };
        decl.attributes.attrs = attrs;
        decl.attributes.access = access;
        Ok(decl)
    }

    /// Parse a whole package.
    ///
    /// # Grammar
    ///
    /// ```grammar
    /// Package ::= ("import" Import ";")* Decl* #End-Of-Input
    /// ```
    pub(crate) fn parse_package(&mut self) -> Result<Package> {
        let start = self.start()?;
        let mut header = Vec::new();
        let mut decls = Vec::new();
        while self.peek()?.bare == Import {
            self.next()?;
            header.push(self.parse_import()?);
            self.expect(Semicolon)?;
        }
        while self.peek()?.bare != EndOfInput {
            decls.push(self.parse_decl()?);
        }
        self.done()?;
        Ok(Package {
            ident: self.package.clone(),
            header,
            decls,
            span: self.span_from(start),
        })
    }

    /// Parse the braced body of a module-like declaration.
    fn parse_decl_body(&mut self) -> Result<Vec<Decl>> {
        self.expect(OpeningCurlyBracket)?;
        let mut decls = Vec::new();
        while self.peek()?.bare != ClosingCurlyBracket {
            decls.push(self.parse_decl()?);
        }
        self.expect(ClosingCurlyBracket)?;
        Ok(decls)
    }

    /// Parse the body of a class, enum, interface or extension: braced
    /// declarations, or nothing when the declaration closes with `;`.
    fn parse_opt_decl_body(&mut self) -> Result<Vec<Decl>> {
        if self.peek()?.bare == OpeningCurlyBracket {
            self.parse_decl_body()
        } else {
            self.expect(Semicolon)?;
            Ok(Vec::new())
        }
    }

    /// Parse a where-clause if present and merge its bounds.
    fn parse_opt_where_clause(&mut self, bounds: &mut Vec<TyBound>) -> Result<()> {
        if self.consume(Where)? {
            bounds.extend(self.parse_where_bounds()?);
        }
        Ok(())
    }

    fn parse_module_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Module)?;
        let binder = self.parse_ident()?;
        let decls = self.parse_decl_body()?;
        Ok(Decl::common(
            self.span_from(start),
            ModuleDecl { binder, decls }.into(),
        ))
    }

    fn parse_open_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Open)?;
        let import = self.parse_import()?;
        self.expect(Semicolon)?;
        Ok(Decl::common(
            self.span_from(start),
            BareDecl::Open(import),
        ))
    }

    fn parse_class_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Class)?;
        let binder = self.parse_ident()?;

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;
        self.parse_opt_where_clause(&mut bounds)?;

        let decls = self.parse_opt_decl_body()?;
        Ok(Decl::common(
            self.span_from(start),
            ClassDecl {
                binder,
                ty_params,
                bounds,
                decls,
            }
            .into(),
        ))
    }

    fn parse_enum_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Enum)?;
        let binder = self.parse_ident()?;

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;
        self.parse_opt_where_clause(&mut bounds)?;

        let decls = self.parse_opt_decl_body()?;
        Ok(Decl::common(
            self.span_from(start),
            EnumDecl {
                binder,
                ty_params,
                bounds,
                decls,
            }
            .into(),
        ))
    }

    fn parse_typealias_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Type)?;
        let binder = self.parse_ident()?;

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;

        let hint = if self.consume(Colon)? {
            self.parse_ty_bound()?
        } else {
            Vec::new()
        };

        self.parse_opt_where_clause(&mut bounds)?;

        let aliased = if self.consume(Equals)? {
            Some(self.parse_ty()?)
        } else {
            None
        };
        self.expect(Semicolon)?;

        Ok(Decl::common(
            self.span_from(start),
            TypealiasDecl {
                binder,
                ty_params,
                bounds,
                hint,
                aliased,
            }
            .into(),
        ))
    }

    fn parse_interface_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Interface)?;
        let binder = self.parse_ident()?;

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;
        self.parse_opt_where_clause(&mut bounds)?;

        let decls = self.parse_opt_decl_body()?;
        Ok(Decl::common(
            self.span_from(start),
            InterfaceDecl {
                binder,
                ty_params,
                bounds,
                decls,
            }
            .into(),
        ))
    }

    /// Parse an extension declaration: `extension <T, …>? BASE : INTERFACE`.
    ///
    /// Extensions are anonymous in the source; the table builder synthesizes
    /// their identifier.
    fn parse_extension_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Extension)?;

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;

        let base = self.parse_ty()?;
        self.expect(Colon)?;
        let interface = self.parse_ty()?;

        self.parse_opt_where_clause(&mut bounds)?;

        let decls = self.parse_opt_decl_body()?;
        Ok(Decl::common(
            self.span_from(start),
            ExtensionDecl {
                binder: None,
                ty_params,
                bounds,
                base,
                interface,
                decls,
            }
            .into(),
        ))
    }

    fn parse_let_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Let)?;
        let pat = self.parse_basic_pat(true)?;

        let body = if self.consume(Equals)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(Semicolon)?;

        Ok(Decl::common(
            self.span_from(start),
            LetDecl { pat, body }.into(),
        ))
    }

    /// Parse the shared tail of function-like declarations: parameter list,
    /// optional return type, optional where-clause, body or `;`.
    fn parse_func_tail(
        &mut self,
        bounds: &mut Vec<TyBound>,
    ) -> Result<(Vec<ast::Pat>, ast::Ty, Option<ast::Expr>)> {
        self.expect(OpeningRoundBracket)?;
        let params = self.parse_sep(|this| this.parse_pat(true), Comma, false, false)?;
        self.expect(ClosingRoundBracket)?;

        let output = if self.consume(ThinArrowRight)? {
            self.parse_ty()?
        } else {
            Spanned::new(Span::default(), BareTy::Meta)
        };

        self.parse_opt_where_clause(bounds)?;

        let token = self.peek()?;
        let body = match token.bare {
            OpeningCurlyBracket => Some(self.parse_block_expr()?),
            BareToken::Semicolon => {
                self.next()?;
                None
            }
            _ => {
                return Err(expected_error(
                    vec![
                        Expectation::Token(OpeningCurlyBracket),
                        Expectation::Token(BareToken::Semicolon),
                    ],
                    token,
                ))
            }
        };

        Ok((params, output, body))
    }

    fn parse_func_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Func)?;
        let binder = self.parse_ident()?;

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;
        let (params, output, body) = self.parse_func_tail(&mut bounds)?;

        Ok(Decl::common(
            self.span_from(start),
            FuncDecl {
                binder,
                ty_params,
                bounds,
                params,
                output,
                body,
            }
            .into(),
        ))
    }

    fn parse_init_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Init)?;
        let binder = if self.peek()?.bare == Word {
            Some(self.parse_ident()?)
        } else {
            None
        };

        let mut bounds = Vec::new();
        let ty_params = self.parse_ty_params(&mut bounds)?;
        let (params, output, body) = self.parse_func_tail(&mut bounds)?;

        Ok(Decl::common(
            self.span_from(start),
            InitDecl {
                binder,
                ty_params,
                bounds,
                params,
                output,
                body,
            }
            .into(),
        ))
    }

    fn parse_ctor_decl(&mut self) -> Result<Decl> {
        let start = self.start()?;
        self.expect(Case)?;
        let binder = self.parse_ident()?;
        let params = if self.consume(OpeningRoundBracket)? {
            let params = self.parse_sep(Self::parse_ty, Comma, false, false)?;
            self.expect(ClosingRoundBracket)?;
            Some(params)
        } else {
            None
        };
        Ok(Decl::common(
            self.span_from(start),
            CtorDecl { binder, params }.into(),
        ))
    }
}
