//! AST visitor trait for read-only traversal of the syntax tree.
//!
//! Default implementations walk into children in source order. Every node
//! visit is bracketed by [`Visit::enter_node`] / [`Visit::leave_node`], which
//! receive the node's name and span, so a collaborator that only cares about
//! spans (a printer, a span checker) implements just those two hooks.

use crate::node::*;
use rsecma_core::TokenSpan;

pub trait Visit<'src> {
    /// Called before a node's children are visited.
    fn enter_node(&mut self, _name: &'static str, _span: TokenSpan) {}

    /// Called after a node's children are visited.
    fn leave_node(&mut self, _name: &'static str, _span: TokenSpan) {}

    fn visit_program(&mut self, node: &Program<'src>) {
        self.enter_node("Program", node.span);
        for stmt in &node.body {
            self.visit_statement(stmt);
        }
        self.leave_node("Program", node.span);
    }

    fn visit_statement(&mut self, stmt: &Statement<'src>) {
        match stmt {
            Statement::Block(n) => self.visit_block(n),
            Statement::Empty(span) => self.visit_leaf("EmptyStatement", *span),
            Statement::Expression(n) => {
                self.enter_node("ExpressionStatement", n.span);
                self.visit_expression(&n.expression);
                self.leave_node("ExpressionStatement", n.span);
            }
            Statement::If(n) => {
                self.enter_node("IfStatement", n.span);
                self.visit_expression(&n.test);
                self.visit_statement(&n.consequent);
                if let Some(alt) = &n.alternate {
                    self.visit_statement(alt);
                }
                self.leave_node("IfStatement", n.span);
            }
            Statement::DoWhile(n) => {
                self.enter_node("DoWhileStatement", n.span);
                self.visit_statement(&n.body);
                self.visit_expression(&n.test);
                self.leave_node("DoWhileStatement", n.span);
            }
            Statement::While(n) => {
                self.enter_node("WhileStatement", n.span);
                self.visit_expression(&n.test);
                self.visit_statement(&n.body);
                self.leave_node("WhileStatement", n.span);
            }
            Statement::For(n) => {
                self.enter_node("ForStatement", n.span);
                match &n.init {
                    Some(ForInit::Variable(decl)) => self.visit_variable_declaration(decl),
                    Some(ForInit::Expression(expr)) => self.visit_expression(expr),
                    None => {}
                }
                if let Some(test) = &n.test {
                    self.visit_expression(test);
                }
                if let Some(update) = &n.update {
                    self.visit_expression(update);
                }
                self.visit_statement(&n.body);
                self.leave_node("ForStatement", n.span);
            }
            Statement::ForIn(n) => {
                self.enter_node("ForInStatement", n.span);
                self.visit_for_head(&n.left);
                self.visit_expression(&n.right);
                self.visit_statement(&n.body);
                self.leave_node("ForInStatement", n.span);
            }
            Statement::ForOf(n) => {
                self.enter_node("ForOfStatement", n.span);
                self.visit_for_head(&n.left);
                self.visit_expression(&n.right);
                self.visit_statement(&n.body);
                self.leave_node("ForOfStatement", n.span);
            }
            Statement::Continue(n) => {
                self.enter_node("ContinueStatement", n.span);
                if let Some(label) = &n.label {
                    self.visit_identifier(label);
                }
                self.leave_node("ContinueStatement", n.span);
            }
            Statement::Break(n) => {
                self.enter_node("BreakStatement", n.span);
                if let Some(label) = &n.label {
                    self.visit_identifier(label);
                }
                self.leave_node("BreakStatement", n.span);
            }
            Statement::Return(n) => {
                self.enter_node("ReturnStatement", n.span);
                if let Some(arg) = &n.argument {
                    self.visit_expression(arg);
                }
                self.leave_node("ReturnStatement", n.span);
            }
            Statement::With(n) => {
                self.enter_node("WithStatement", n.span);
                self.visit_expression(&n.object);
                self.visit_statement(&n.body);
                self.leave_node("WithStatement", n.span);
            }
            Statement::Switch(n) => {
                self.enter_node("SwitchStatement", n.span);
                self.visit_expression(&n.discriminant);
                for case in &n.cases {
                    self.enter_node("SwitchCase", case.span);
                    if let Some(test) = &case.test {
                        self.visit_expression(test);
                    }
                    for stmt in &case.consequent {
                        self.visit_statement(stmt);
                    }
                    self.leave_node("SwitchCase", case.span);
                }
                self.leave_node("SwitchStatement", n.span);
            }
            Statement::Labeled(n) => {
                self.enter_node("LabeledStatement", n.span);
                self.visit_identifier(&n.label);
                self.visit_statement(&n.body);
                self.leave_node("LabeledStatement", n.span);
            }
            Statement::Throw(n) => {
                self.enter_node("ThrowStatement", n.span);
                self.visit_expression(&n.argument);
                self.leave_node("ThrowStatement", n.span);
            }
            Statement::Try(n) => {
                self.enter_node("TryStatement", n.span);
                self.visit_block(&n.block);
                if let Some(handler) = &n.handler {
                    self.enter_node("CatchClause", handler.span);
                    if let Some(param) = &handler.param {
                        self.visit_binding_pattern(param);
                    }
                    self.visit_block(&handler.body);
                    self.leave_node("CatchClause", handler.span);
                }
                if let Some(finalizer) = &n.finalizer {
                    self.visit_block(finalizer);
                }
                self.leave_node("TryStatement", n.span);
            }
            Statement::Debugger(span) => self.visit_leaf("DebuggerStatement", *span),
            Statement::Variable(n) => self.visit_variable_declaration(n),
            Statement::Function(n) => self.visit_function(n),
            Statement::Class(n) => self.visit_class(n),
            Statement::Import(n) => self.visit_import_declaration(n),
            Statement::Export(n) => self.visit_export_declaration(n),
            Statement::Erased(span) => self.visit_leaf("Erased", *span),
        }
    }

    fn visit_leaf(&mut self, name: &'static str, span: TokenSpan) {
        self.enter_node(name, span);
        self.leave_node(name, span);
    }

    fn visit_block(&mut self, node: &BlockStatement<'src>) {
        self.enter_node("BlockStatement", node.span);
        for stmt in &node.body {
            self.visit_statement(stmt);
        }
        self.leave_node("BlockStatement", node.span);
    }

    fn visit_for_head(&mut self, head: &ForHead<'src>) {
        match head {
            ForHead::Variable(decl) => self.visit_variable_declaration(decl),
            ForHead::Target(target) => self.visit_assignment_target(target),
        }
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration<'src>) {
        self.enter_node("VariableDeclaration", node.span);
        for decl in &node.declarations {
            self.enter_node("VariableDeclarator", decl.span);
            self.visit_binding_pattern(&decl.id);
            if let Some(init) = &decl.init {
                self.visit_expression(init);
            }
            self.leave_node("VariableDeclarator", decl.span);
        }
        self.leave_node("VariableDeclaration", node.span);
    }

    // -- Functions and classes --

    fn visit_function(&mut self, node: &Function<'src>) {
        self.enter_node("Function", node.span);
        if let Some(id) = &node.id {
            self.visit_identifier(id);
        }
        self.visit_formal_parameters(&node.params);
        self.visit_function_body(&node.body);
        self.leave_node("Function", node.span);
    }

    fn visit_formal_parameters(&mut self, node: &FormalParameters<'src>) {
        self.enter_node("FormalParameters", node.span);
        for item in &node.items {
            self.visit_binding_element(item);
        }
        if let Some(rest) = &node.rest {
            self.visit_binding_rest(rest);
        }
        self.leave_node("FormalParameters", node.span);
    }

    fn visit_function_body(&mut self, node: &FunctionBody<'src>) {
        self.enter_node("FunctionBody", node.span);
        for stmt in &node.statements {
            self.visit_statement(stmt);
        }
        self.leave_node("FunctionBody", node.span);
    }

    fn visit_arrow_function(&mut self, node: &ArrowFunction<'src>) {
        self.enter_node("ArrowFunction", node.span);
        self.visit_formal_parameters(&node.params);
        match &node.body {
            ArrowBody::Expression(expr) => self.visit_expression(expr),
            ArrowBody::Block(body) => self.visit_function_body(body),
        }
        self.leave_node("ArrowFunction", node.span);
    }

    fn visit_class(&mut self, node: &Class<'src>) {
        self.enter_node("Class", node.span);
        if let Some(id) = &node.id {
            self.visit_identifier(id);
        }
        if let Some(super_class) = &node.super_class {
            self.visit_expression(super_class);
        }
        self.enter_node("ClassBody", node.body.span);
        for element in &node.body.elements {
            self.visit_class_element(element);
        }
        self.leave_node("ClassBody", node.body.span);
        self.leave_node("Class", node.span);
    }

    fn visit_class_element(&mut self, element: &ClassElement<'src>) {
        match element {
            ClassElement::Method(n) => self.visit_method(n),
            ClassElement::Field(n) => {
                self.enter_node("FieldDefinition", n.span);
                self.visit_property_key(&n.key);
                if let Some(value) = &n.value {
                    self.visit_expression(value);
                }
                self.leave_node("FieldDefinition", n.span);
            }
            ClassElement::StaticBlock(n) => {
                self.enter_node("StaticBlock", n.span);
                for stmt in &n.body {
                    self.visit_statement(stmt);
                }
                self.leave_node("StaticBlock", n.span);
            }
            ClassElement::Empty(span) => self.visit_leaf("EmptyClassElement", *span),
            ClassElement::Erased(span) => self.visit_leaf("Erased", *span),
        }
    }

    fn visit_method(&mut self, node: &MethodDefinition<'src>) {
        self.enter_node("MethodDefinition", node.span);
        self.visit_property_key(&node.key);
        self.visit_function(&node.value);
        self.leave_node("MethodDefinition", node.span);
    }

    // -- Expressions --

    fn visit_expression(&mut self, expr: &Expression<'src>) {
        match expr {
            Expression::Identifier(n) => self.visit_identifier(n),
            Expression::This(span) => self.visit_leaf("ThisExpression", *span),
            Expression::Super(span) => self.visit_leaf("Super", *span),
            Expression::Literal(n) => self.visit_literal(n),
            Expression::Array(n) => {
                self.enter_node("ArrayLiteral", n.span);
                for element in &n.elements {
                    match element {
                        ArrayElement::Expression(e) => self.visit_expression(e),
                        ArrayElement::Spread(s) => self.visit_spread(s),
                        ArrayElement::Hole => {}
                    }
                }
                self.leave_node("ArrayLiteral", n.span);
            }
            Expression::Object(n) => {
                self.enter_node("ObjectLiteral", n.span);
                for prop in &n.properties {
                    self.visit_property_definition(prop);
                }
                self.leave_node("ObjectLiteral", n.span);
            }
            Expression::Function(n) => self.visit_function(n),
            Expression::Class(n) => self.visit_class(n),
            Expression::Arrow(n) => self.visit_arrow_function(n),
            Expression::Template(n) => self.visit_template(n),
            Expression::TaggedTemplate(n) => {
                self.enter_node("TaggedTemplate", n.span);
                self.visit_expression(&n.tag);
                self.visit_template(&n.quasi);
                self.leave_node("TaggedTemplate", n.span);
            }
            Expression::Parenthesized(n) => {
                self.enter_node("ParenthesizedExpression", n.span);
                self.visit_expression(&n.expression);
                self.leave_node("ParenthesizedExpression", n.span);
            }
            Expression::Member(n) => self.visit_member(n),
            Expression::Call(n) => {
                self.enter_node("CallExpression", n.span);
                self.visit_expression(&n.callee);
                for arg in &n.arguments {
                    self.visit_argument(arg);
                }
                self.leave_node("CallExpression", n.span);
            }
            Expression::New(n) => {
                self.enter_node("NewExpression", n.span);
                self.visit_expression(&n.callee);
                for arg in n.arguments.iter().flatten() {
                    self.visit_argument(arg);
                }
                self.leave_node("NewExpression", n.span);
            }
            Expression::Chain(n) => {
                self.enter_node("ChainExpression", n.span);
                self.visit_expression(&n.expression);
                self.leave_node("ChainExpression", n.span);
            }
            Expression::MetaProperty(n) => {
                self.enter_node("MetaProperty", n.span);
                self.visit_identifier(&n.meta);
                self.visit_identifier(&n.property);
                self.leave_node("MetaProperty", n.span);
            }
            Expression::ImportCall(n) => {
                self.enter_node("ImportCall", n.span);
                self.visit_expression(&n.source);
                if let Some(options) = &n.options {
                    self.visit_expression(options);
                }
                self.leave_node("ImportCall", n.span);
            }
            Expression::Update(n) => {
                self.enter_node("UpdateExpression", n.span);
                self.visit_simple_target(&n.argument);
                self.leave_node("UpdateExpression", n.span);
            }
            Expression::Unary(n) => {
                self.enter_node("UnaryExpression", n.span);
                self.visit_expression(&n.argument);
                self.leave_node("UnaryExpression", n.span);
            }
            Expression::Await(n) => {
                self.enter_node("AwaitExpression", n.span);
                self.visit_expression(&n.argument);
                self.leave_node("AwaitExpression", n.span);
            }
            Expression::Binary(n) => {
                self.enter_node("BinaryExpression", n.span);
                self.visit_expression(&n.left);
                self.visit_expression(&n.right);
                self.leave_node("BinaryExpression", n.span);
            }
            Expression::PrivateIn(n) => {
                self.enter_node("PrivateInExpression", n.span);
                self.visit_leaf("PrivateName", n.name.span);
                self.visit_expression(&n.right);
                self.leave_node("PrivateInExpression", n.span);
            }
            Expression::Conditional(n) => {
                self.enter_node("ConditionalExpression", n.span);
                self.visit_expression(&n.test);
                self.visit_expression(&n.consequent);
                self.visit_expression(&n.alternate);
                self.leave_node("ConditionalExpression", n.span);
            }
            Expression::Assignment(n) => {
                self.enter_node("AssignmentExpression", n.span);
                self.visit_assignment_target(&n.target);
                self.visit_expression(&n.value);
                self.leave_node("AssignmentExpression", n.span);
            }
            Expression::Yield(n) => {
                self.enter_node("YieldExpression", n.span);
                if let Some(arg) = &n.argument {
                    self.visit_expression(arg);
                }
                self.leave_node("YieldExpression", n.span);
            }
            Expression::Sequence(n) => {
                self.enter_node("SequenceExpression", n.span);
                for e in &n.expressions {
                    self.visit_expression(e);
                }
                self.leave_node("SequenceExpression", n.span);
            }
        }
    }

    fn visit_identifier(&mut self, node: &Identifier<'src>) {
        self.visit_leaf("Identifier", node.span);
    }

    fn visit_literal(&mut self, node: &Literal<'src>) {
        self.visit_leaf("Literal", node.span);
    }

    fn visit_template(&mut self, node: &TemplateLiteral<'src>) {
        self.enter_node("TemplateLiteral", node.span);
        // Quasis and substitutions interleave in source order.
        for (index, quasi) in node.quasis.iter().enumerate() {
            self.visit_leaf("TemplateElement", quasi.span);
            if let Some(expr) = node.expressions.get(index) {
                self.visit_expression(expr);
            }
        }
        self.leave_node("TemplateLiteral", node.span);
    }

    fn visit_member(&mut self, node: &MemberExpression<'src>) {
        self.enter_node("MemberExpression", node.span);
        self.visit_expression(&node.object);
        match &node.property {
            MemberProperty::Identifier(id) => self.visit_identifier(id),
            MemberProperty::Private(p) => self.visit_leaf("PrivateName", p.span),
            MemberProperty::Computed(e) => self.visit_expression(e),
        }
        self.leave_node("MemberExpression", node.span);
    }

    fn visit_argument(&mut self, arg: &Argument<'src>) {
        match arg {
            Argument::Expression(e) => self.visit_expression(e),
            Argument::Spread(s) => self.visit_spread(s),
        }
    }

    fn visit_spread(&mut self, node: &SpreadElement<'src>) {
        self.enter_node("SpreadElement", node.span);
        self.visit_expression(&node.argument);
        self.leave_node("SpreadElement", node.span);
    }

    fn visit_property_definition(&mut self, prop: &PropertyDefinition<'src>) {
        match prop {
            PropertyDefinition::KeyValue(n) => {
                self.enter_node("KeyValueProperty", n.span);
                self.visit_property_key(&n.key);
                self.visit_expression(&n.value);
                self.leave_node("KeyValueProperty", n.span);
            }
            PropertyDefinition::Shorthand(id) => self.visit_identifier(id),
            PropertyDefinition::CoverInitializedName(n) => {
                self.enter_node("CoverInitializedName", n.span);
                self.visit_identifier(&n.name);
                self.visit_expression(&n.initializer);
                self.leave_node("CoverInitializedName", n.span);
            }
            PropertyDefinition::Method(n) => self.visit_method(n),
            PropertyDefinition::Spread(n) => self.visit_spread(n),
        }
    }

    fn visit_property_key(&mut self, key: &PropertyKey<'src>) {
        match key {
            PropertyKey::Identifier(id) => self.visit_identifier(id),
            PropertyKey::String(lit) | PropertyKey::Numeric(lit) => self.visit_literal(lit),
            PropertyKey::Computed(n) => {
                self.enter_node("ComputedKey", n.span);
                self.visit_expression(&n.expression);
                self.leave_node("ComputedKey", n.span);
            }
            PropertyKey::Private(p) => self.visit_leaf("PrivateName", p.span),
        }
    }

    // -- Patterns --

    fn visit_assignment_target(&mut self, target: &AssignmentTarget<'src>) {
        match target {
            AssignmentTarget::Simple(simple) => self.visit_simple_target(simple),
            AssignmentTarget::Pattern(AssignmentPattern::Object(n)) => {
                self.enter_node("ObjectAssignmentPattern", n.span);
                for prop in &n.properties {
                    match prop {
                        AssignmentProperty::Shorthand(s) => {
                            self.enter_node("AssignmentShorthand", s.span);
                            self.visit_identifier(&s.name);
                            if let Some(default) = &s.default {
                                self.visit_expression(default);
                            }
                            self.leave_node("AssignmentShorthand", s.span);
                        }
                        AssignmentProperty::KeyValue(kv) => {
                            self.enter_node("AssignmentKeyValue", kv.span);
                            self.visit_property_key(&kv.key);
                            self.visit_assignment_element(&kv.value);
                            self.leave_node("AssignmentKeyValue", kv.span);
                        }
                    }
                }
                if let Some(rest) = &n.rest {
                    self.visit_assignment_rest(rest);
                }
                self.leave_node("ObjectAssignmentPattern", n.span);
            }
            AssignmentTarget::Pattern(AssignmentPattern::Array(n)) => {
                self.enter_node("ArrayAssignmentPattern", n.span);
                for element in n.elements.iter().flatten() {
                    self.visit_assignment_element(element);
                }
                if let Some(rest) = &n.rest {
                    self.visit_assignment_rest(rest);
                }
                self.leave_node("ArrayAssignmentPattern", n.span);
            }
        }
    }

    fn visit_simple_target(&mut self, target: &SimpleAssignmentTarget<'src>) {
        match target {
            SimpleAssignmentTarget::Identifier(id) => self.visit_identifier(id),
            SimpleAssignmentTarget::Member(m) => self.visit_member(m),
            SimpleAssignmentTarget::Parenthesized(p) => {
                self.enter_node("ParenthesizedTarget", p.span);
                self.visit_simple_target(&p.target);
                self.leave_node("ParenthesizedTarget", p.span);
            }
        }
    }

    fn visit_assignment_element(&mut self, node: &AssignmentElement<'src>) {
        self.enter_node("AssignmentElement", node.span);
        self.visit_assignment_target(&node.target);
        if let Some(default) = &node.default {
            self.visit_expression(default);
        }
        self.leave_node("AssignmentElement", node.span);
    }

    fn visit_assignment_rest(&mut self, node: &AssignmentRest<'src>) {
        self.enter_node("AssignmentRest", node.span);
        self.visit_assignment_target(&node.target);
        self.leave_node("AssignmentRest", node.span);
    }

    fn visit_binding_pattern(&mut self, pattern: &BindingPattern<'src>) {
        match pattern {
            BindingPattern::Identifier(id) => self.visit_identifier(id),
            BindingPattern::Object(n) => {
                self.enter_node("ObjectPattern", n.span);
                for prop in &n.properties {
                    match prop {
                        BindingProperty::Shorthand(s) => {
                            self.enter_node("BindingShorthand", s.span);
                            self.visit_identifier(&s.name);
                            if let Some(default) = &s.default {
                                self.visit_expression(default);
                            }
                            self.leave_node("BindingShorthand", s.span);
                        }
                        BindingProperty::KeyValue(kv) => {
                            self.enter_node("BindingKeyValue", kv.span);
                            self.visit_property_key(&kv.key);
                            self.visit_binding_element(&kv.value);
                            self.leave_node("BindingKeyValue", kv.span);
                        }
                    }
                }
                if let Some(rest) = &n.rest {
                    self.visit_binding_rest(rest);
                }
                self.leave_node("ObjectPattern", n.span);
            }
            BindingPattern::Array(n) => {
                self.enter_node("ArrayPattern", n.span);
                for element in n.elements.iter().flatten() {
                    self.visit_binding_element(element);
                }
                if let Some(rest) = &n.rest {
                    self.visit_binding_rest(rest);
                }
                self.leave_node("ArrayPattern", n.span);
            }
        }
    }

    fn visit_binding_element(&mut self, node: &BindingElement<'src>) {
        self.enter_node("BindingElement", node.span);
        self.visit_binding_pattern(&node.pattern);
        if let Some(default) = &node.default {
            self.visit_expression(default);
        }
        self.leave_node("BindingElement", node.span);
    }

    fn visit_binding_rest(&mut self, node: &BindingRestElement<'src>) {
        self.enter_node("BindingRestElement", node.span);
        self.visit_binding_pattern(&node.argument);
        self.leave_node("BindingRestElement", node.span);
    }

    // -- Modules --

    fn visit_import_declaration(&mut self, node: &ImportDeclaration<'src>) {
        self.enter_node("ImportDeclaration", node.span);
        for spec in &node.specifiers {
            match spec {
                ImportSpecifier::Default(id) => self.visit_identifier(id),
                ImportSpecifier::Namespace(ns) => {
                    self.enter_node("NamespaceSpecifier", ns.span);
                    self.visit_identifier(&ns.local);
                    self.leave_node("NamespaceSpecifier", ns.span);
                }
                ImportSpecifier::Named(named) => {
                    self.enter_node("NamedImport", named.span);
                    if let Some(imported) = &named.imported {
                        self.visit_module_export_name(imported);
                    }
                    self.visit_identifier(&named.local);
                    self.leave_node("NamedImport", named.span);
                }
            }
        }
        self.visit_literal(&node.source);
        self.visit_import_attributes(&node.attributes);
        self.leave_node("ImportDeclaration", node.span);
    }

    fn visit_import_attributes(&mut self, attributes: &[ImportAttribute<'src>]) {
        for attr in attributes {
            self.enter_node("ImportAttribute", attr.span);
            self.visit_module_export_name(&attr.key);
            self.visit_literal(&attr.value);
            self.leave_node("ImportAttribute", attr.span);
        }
    }

    fn visit_module_export_name(&mut self, name: &ModuleExportName<'src>) {
        match name {
            ModuleExportName::Identifier(id) => self.visit_identifier(id),
            ModuleExportName::String(lit) => self.visit_literal(lit),
        }
    }

    fn visit_export_declaration(&mut self, node: &ExportDeclaration<'src>) {
        match node {
            ExportDeclaration::Named(n) => {
                self.enter_node("ExportNamed", n.span);
                for spec in &n.specifiers {
                    self.enter_node("ExportSpecifier", spec.span);
                    self.visit_module_export_name(&spec.local);
                    if let Some(exported) = &spec.exported {
                        self.visit_module_export_name(exported);
                    }
                    self.leave_node("ExportSpecifier", spec.span);
                }
                if let Some(source) = &n.source {
                    self.visit_literal(source);
                }
                self.visit_import_attributes(&n.attributes);
                self.leave_node("ExportNamed", n.span);
            }
            ExportDeclaration::All(n) => {
                self.enter_node("ExportAll", n.span);
                if let Some(exported) = &n.exported {
                    self.visit_module_export_name(exported);
                }
                self.visit_literal(&n.source);
                self.visit_import_attributes(&n.attributes);
                self.leave_node("ExportAll", n.span);
            }
            ExportDeclaration::Declaration(n) => {
                self.enter_node("ExportDecl", n.span);
                self.visit_statement(&n.declaration);
                self.leave_node("ExportDecl", n.span);
            }
            ExportDeclaration::Default(n) => {
                self.enter_node("ExportDefault", n.span);
                match &n.value {
                    ExportDefaultValue::Function(f) => self.visit_function(f),
                    ExportDefaultValue::Class(c) => self.visit_class(c),
                    ExportDefaultValue::Expression(e) => self.visit_expression(e),
                }
                self.leave_node("ExportDefault", n.span);
            }
        }
    }
}
