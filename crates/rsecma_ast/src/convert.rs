//! Fallible reinterpretation of already-built nodes.
//!
//! Cover grammars parse a construct generically first and decide what it is
//! later: an object literal becomes an assignment pattern once `=` follows, a
//! parenthesized list becomes arrow parameters once `=>` follows. Each such
//! step is a `TryFrom` impl here, returning [`ConversionError`] when the shape
//! does not fit. Spans carry over unchanged.

use crate::node::*;
use rsecma_core::TokenSpan;
use serde::Serialize;
use thiserror::Error;

/// A node could not be reinterpreted as the required shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ConversionError {
    #[error("invalid assignment target")]
    InvalidAssignmentTarget { span: TokenSpan },
    #[error("invalid destructuring target")]
    InvalidDestructuringTarget { span: TokenSpan },
    #[error("invalid binding pattern")]
    InvalidBindingPattern { span: TokenSpan },
    #[error("rest element must be last")]
    RestNotLast { span: TokenSpan },
    #[error("rest element may not have a trailing comma")]
    RestTrailingComma { span: TokenSpan },
    #[error("rest element may not have a default value")]
    RestWithDefault { span: TokenSpan },
    #[error("empty parenthesized expression")]
    EmptyParentheses { span: TokenSpan },
    #[error("trailing comma in parenthesized expression")]
    ParenthesizedTrailingComma { span: TokenSpan },
}

impl ConversionError {
    /// The span of the offending node.
    pub fn span(&self) -> TokenSpan {
        match *self {
            ConversionError::InvalidAssignmentTarget { span }
            | ConversionError::InvalidDestructuringTarget { span }
            | ConversionError::InvalidBindingPattern { span }
            | ConversionError::RestNotLast { span }
            | ConversionError::RestTrailingComma { span }
            | ConversionError::RestWithDefault { span }
            | ConversionError::EmptyParentheses { span }
            | ConversionError::ParenthesizedTrailingComma { span } => span,
        }
    }
}

type Result<T> = std::result::Result<T, ConversionError>;

// ============================================================================
// Parenthesized cover
// ============================================================================

/// The generic parse of `( … )` before it is known to be arrow parameters
/// or a parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverParenthesized<'src> {
    /// Includes both parentheses.
    pub span: TokenSpan,
    pub items: Vec<CoverItem<'src>>,
    pub trailing_comma: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoverItem<'src> {
    Expression(Expression<'src>),
    /// `...pattern`, only ever valid as a parameter.
    Rest(BindingRestElement<'src>),
}

impl<'src> TryFrom<CoverParenthesized<'src>> for FormalParameters<'src> {
    type Error = ConversionError;

    fn try_from(cover: CoverParenthesized<'src>) -> Result<Self> {
        let count = cover.items.len();
        let mut items = Vec::with_capacity(count);
        let mut rest = None;
        for (index, item) in cover.items.into_iter().enumerate() {
            match item {
                CoverItem::Expression(expr) => items.push(BindingElement::try_from(expr)?),
                CoverItem::Rest(element) => {
                    if index + 1 != count {
                        return Err(ConversionError::RestNotLast { span: element.span });
                    }
                    if cover.trailing_comma {
                        return Err(ConversionError::RestTrailingComma { span: element.span });
                    }
                    rest = Some(element);
                }
            }
        }
        Ok(FormalParameters {
            span: cover.span,
            items,
            rest,
        })
    }
}

impl<'src> TryFrom<CoverParenthesized<'src>> for ParenthesizedExpression<'src> {
    type Error = ConversionError;

    fn try_from(cover: CoverParenthesized<'src>) -> Result<Self> {
        if cover.trailing_comma {
            return Err(ConversionError::ParenthesizedTrailingComma { span: cover.span });
        }
        let mut expressions = Vec::with_capacity(cover.items.len());
        for item in cover.items {
            match item {
                CoverItem::Expression(expr) => expressions.push(expr),
                CoverItem::Rest(element) => {
                    return Err(ConversionError::InvalidDestructuringTarget { span: element.span })
                }
            }
        }
        let expression = match expressions.len() {
            0 => return Err(ConversionError::EmptyParentheses { span: cover.span }),
            1 => expressions.remove(0),
            _ => {
                let span = TokenSpan::new(
                    expressions[0].span().start,
                    expressions[expressions.len() - 1].span().end,
                );
                Expression::Sequence(Box::new(SequenceExpression { span, expressions }))
            }
        };
        Ok(ParenthesizedExpression {
            span: cover.span,
            expression,
        })
    }
}

// ============================================================================
// Assignment targets
// ============================================================================

impl<'src> TryFrom<Expression<'src>> for SimpleAssignmentTarget<'src> {
    type Error = ConversionError;

    fn try_from(expr: Expression<'src>) -> Result<Self> {
        match expr {
            Expression::Identifier(id) => Ok(SimpleAssignmentTarget::Identifier(id)),
            Expression::Member(member) if !member.optional => {
                Ok(SimpleAssignmentTarget::Member(member))
            }
            Expression::Parenthesized(paren) => {
                let span = paren.span;
                let target = SimpleAssignmentTarget::try_from(paren.expression)
                    .map_err(|_| ConversionError::InvalidAssignmentTarget { span })?;
                Ok(SimpleAssignmentTarget::Parenthesized(Box::new(
                    ParenthesizedTarget { span, target },
                )))
            }
            other => Err(ConversionError::InvalidAssignmentTarget { span: other.span() }),
        }
    }
}

impl<'src> TryFrom<Expression<'src>> for AssignmentTarget<'src> {
    type Error = ConversionError;

    fn try_from(expr: Expression<'src>) -> Result<Self> {
        match expr {
            Expression::Object(obj) => Ok(AssignmentTarget::Pattern(AssignmentPattern::Object(
                Box::new(ObjectAssignmentPattern::try_from(*obj)?),
            ))),
            Expression::Array(arr) => Ok(AssignmentTarget::Pattern(AssignmentPattern::Array(
                Box::new(ArrayAssignmentPattern::try_from(*arr)?),
            ))),
            other => SimpleAssignmentTarget::try_from(other).map(AssignmentTarget::Simple),
        }
    }
}

/// A destructuring element: `target` or `target = default`.
impl<'src> TryFrom<Expression<'src>> for AssignmentElement<'src> {
    type Error = ConversionError;

    fn try_from(expr: Expression<'src>) -> Result<Self> {
        let span = expr.span();
        match expr {
            Expression::Assignment(assign) if assign.operator == AssignmentOperator::Assign => {
                let AssignmentExpression { target, value, .. } = *assign;
                Ok(AssignmentElement {
                    span,
                    target,
                    default: Some(value),
                })
            }
            other => Ok(AssignmentElement {
                span,
                target: AssignmentTarget::try_from(other).map_err(|e| match e {
                    ConversionError::InvalidAssignmentTarget { span } => {
                        ConversionError::InvalidDestructuringTarget { span }
                    }
                    e => e,
                })?,
                default: None,
            }),
        }
    }
}

fn assignment_rest<'src>(spread: SpreadElement<'src>) -> Result<AssignmentRest<'src>> {
    if let Expression::Assignment(assign) = &spread.argument {
        return Err(ConversionError::RestWithDefault { span: assign.span });
    }
    let target = AssignmentTarget::try_from(spread.argument)?;
    Ok(AssignmentRest {
        span: spread.span,
        target: Box::new(target),
    })
}

impl<'src> TryFrom<ObjectLiteral<'src>> for ObjectAssignmentPattern<'src> {
    type Error = ConversionError;

    fn try_from(obj: ObjectLiteral<'src>) -> Result<Self> {
        let count = obj.properties.len();
        let mut properties = Vec::with_capacity(count);
        let mut rest = None;
        for (index, prop) in obj.properties.into_iter().enumerate() {
            match prop {
                PropertyDefinition::KeyValue(kv) => {
                    let KeyValueProperty { span, key, value } = *kv;
                    properties.push(AssignmentProperty::KeyValue(Box::new(AssignmentKeyValue {
                        span,
                        key,
                        value: AssignmentElement::try_from(value)?,
                    })));
                }
                PropertyDefinition::Shorthand(name) => {
                    properties.push(AssignmentProperty::Shorthand(AssignmentShorthand {
                        span: name.span,
                        name,
                        default: None,
                    }));
                }
                PropertyDefinition::CoverInitializedName(cover) => {
                    let CoverInitializedName {
                        span,
                        name,
                        initializer,
                    } = *cover;
                    properties.push(AssignmentProperty::Shorthand(AssignmentShorthand {
                        span,
                        name,
                        default: Some(initializer),
                    }));
                }
                PropertyDefinition::Spread(spread) => {
                    if index + 1 != count {
                        return Err(ConversionError::RestNotLast { span: spread.span });
                    }
                    let target = assignment_rest(spread)?;
                    if matches!(*target.target, AssignmentTarget::Pattern(_)) {
                        return Err(ConversionError::InvalidDestructuringTarget {
                            span: target.span,
                        });
                    }
                    rest = Some(target);
                }
                PropertyDefinition::Method(method) => {
                    return Err(ConversionError::InvalidDestructuringTarget { span: method.span })
                }
            }
        }
        Ok(ObjectAssignmentPattern {
            span: obj.span,
            properties,
            rest,
        })
    }
}

impl<'src> TryFrom<ArrayLiteral<'src>> for ArrayAssignmentPattern<'src> {
    type Error = ConversionError;

    fn try_from(arr: ArrayLiteral<'src>) -> Result<Self> {
        let count = arr.elements.len();
        let mut elements = Vec::with_capacity(count);
        let mut rest = None;
        for (index, element) in arr.elements.into_iter().enumerate() {
            match element {
                ArrayElement::Hole => elements.push(None),
                ArrayElement::Expression(expr) => {
                    elements.push(Some(AssignmentElement::try_from(expr)?))
                }
                ArrayElement::Spread(spread) => {
                    if index + 1 != count {
                        return Err(ConversionError::RestNotLast { span: spread.span });
                    }
                    if arr.trailing_comma {
                        return Err(ConversionError::RestTrailingComma { span: spread.span });
                    }
                    rest = Some(assignment_rest(spread)?);
                }
            }
        }
        Ok(ArrayAssignmentPattern {
            span: arr.span,
            elements,
            rest,
        })
    }
}

// ============================================================================
// Binding patterns
// ============================================================================

impl<'src> TryFrom<Expression<'src>> for BindingPattern<'src> {
    type Error = ConversionError;

    fn try_from(expr: Expression<'src>) -> Result<Self> {
        AssignmentTarget::try_from(expr)
            .map_err(|e| ConversionError::InvalidBindingPattern { span: e.span() })
            .and_then(BindingPattern::try_from)
    }
}

/// A parameter: `pattern` or `pattern = default`.
impl<'src> TryFrom<Expression<'src>> for BindingElement<'src> {
    type Error = ConversionError;

    fn try_from(expr: Expression<'src>) -> Result<Self> {
        let element = AssignmentElement::try_from(expr)
            .map_err(|e| ConversionError::InvalidBindingPattern { span: e.span() })?;
        BindingElement::try_from(element)
    }
}

impl<'src> TryFrom<AssignmentElement<'src>> for BindingElement<'src> {
    type Error = ConversionError;

    fn try_from(element: AssignmentElement<'src>) -> Result<Self> {
        Ok(BindingElement {
            span: element.span,
            pattern: BindingPattern::try_from(element.target)?,
            default: element.default,
        })
    }
}

impl<'src> TryFrom<AssignmentTarget<'src>> for BindingPattern<'src> {
    type Error = ConversionError;

    fn try_from(target: AssignmentTarget<'src>) -> Result<Self> {
        match target {
            AssignmentTarget::Simple(SimpleAssignmentTarget::Identifier(id)) => {
                Ok(BindingPattern::Identifier(id))
            }
            AssignmentTarget::Simple(other) => {
                Err(ConversionError::InvalidBindingPattern { span: other.span() })
            }
            AssignmentTarget::Pattern(AssignmentPattern::Object(obj)) => {
                Ok(BindingPattern::Object(Box::new(ObjectPattern::try_from(*obj)?)))
            }
            AssignmentTarget::Pattern(AssignmentPattern::Array(arr)) => {
                Ok(BindingPattern::Array(Box::new(ArrayPattern::try_from(*arr)?)))
            }
        }
    }
}

fn binding_rest<'src>(rest: AssignmentRest<'src>) -> Result<BindingRestElement<'src>> {
    Ok(BindingRestElement {
        span: rest.span,
        argument: BindingPattern::try_from(*rest.target)?,
    })
}

impl<'src> TryFrom<ObjectAssignmentPattern<'src>> for ObjectPattern<'src> {
    type Error = ConversionError;

    fn try_from(pattern: ObjectAssignmentPattern<'src>) -> Result<Self> {
        let mut properties = Vec::with_capacity(pattern.properties.len());
        for prop in pattern.properties {
            properties.push(match prop {
                AssignmentProperty::Shorthand(s) => BindingProperty::Shorthand(BindingShorthand {
                    span: s.span,
                    name: s.name,
                    default: s.default,
                }),
                AssignmentProperty::KeyValue(kv) => {
                    let AssignmentKeyValue { span, key, value } = *kv;
                    BindingProperty::KeyValue(Box::new(BindingKeyValue {
                        span,
                        key,
                        value: BindingElement::try_from(value)?,
                    }))
                }
            });
        }
        let rest = pattern.rest.map(binding_rest).transpose()?;
        if let Some(rest) = &rest {
            if !matches!(rest.argument, BindingPattern::Identifier(_)) {
                return Err(ConversionError::InvalidBindingPattern { span: rest.span });
            }
        }
        Ok(ObjectPattern {
            span: pattern.span,
            properties,
            rest,
        })
    }
}

impl<'src> TryFrom<ArrayAssignmentPattern<'src>> for ArrayPattern<'src> {
    type Error = ConversionError;

    fn try_from(pattern: ArrayAssignmentPattern<'src>) -> Result<Self> {
        let mut elements = Vec::with_capacity(pattern.elements.len());
        for element in pattern.elements {
            elements.push(element.map(BindingElement::try_from).transpose()?);
        }
        Ok(ArrayPattern {
            span: pattern.span,
            elements,
            rest: pattern.rest.map(binding_rest).transpose()?,
        })
    }
}
