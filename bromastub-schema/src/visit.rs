//! Depth-first traversal over a parsed [`Root`].
//!
//! Implementors override the node kinds they care about; the default methods
//! keep walking so an override only has to call the matching `walk_*`
//! function when it wants to descend.

use crate::types::{Class, Field, FunctionBindField, MemberField, PadField, Root};

/// Visitor over interface description nodes.
pub trait Visitor<'ast> {
    /// Error returned from any visit method.
    type Error;

    /// Visits one class. The default walks its fields.
    ///
    /// # Errors
    /// Propagates the first error raised by a field visit.
    fn visit_class(&mut self, class: &'ast Class) -> Result<(), Self::Error> {
        walk_class(self, class)
    }

    /// Dispatches one field to the matching method.
    ///
    /// # Errors
    /// Propagates the error of the dispatched method.
    fn visit_field(&mut self, field: &'ast Field) -> Result<(), Self::Error> {
        match field {
            Field::Member(member) => self.visit_member(member),
            Field::Pad(pad) => self.visit_pad(pad),
            Field::FunctionBind(function) => self.visit_function_bind(function),
        }
    }

    /// Visits a data member.
    ///
    /// # Errors
    /// Implementation defined.
    fn visit_member(&mut self, _member: &'ast MemberField) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visits a pad.
    ///
    /// # Errors
    /// Implementation defined.
    fn visit_pad(&mut self, _pad: &'ast PadField) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Visits a bound function.
    ///
    /// # Errors
    /// Implementation defined.
    fn visit_function_bind(&mut self, _function: &'ast FunctionBindField) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Visits every class of the tree in declaration order.
///
/// # Errors
/// Stops at and returns the first error.
pub fn walk_root<'ast, V>(visitor: &mut V, root: &'ast Root) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    for class in &root.classes {
        visitor.visit_class(class)?;
    }
    Ok(())
}

/// Visits every field of a class in declaration order.
///
/// # Errors
/// Stops at and returns the first error.
pub fn walk_class<'ast, V>(visitor: &mut V, class: &'ast Class) -> Result<(), V::Error>
where
    V: Visitor<'ast> + ?Sized,
{
    for field in &class.fields {
        visitor.visit_field(field)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FunctionPrototype, TypeRef};
    use std::convert::Infallible;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl<'ast> Visitor<'ast> for Recorder {
        type Error = Infallible;

        fn visit_class(&mut self, class: &'ast Class) -> Result<(), Infallible> {
            self.events.push(format!("class {}", class.name));
            walk_class(self, class)
        }

        fn visit_member(&mut self, member: &'ast MemberField) -> Result<(), Infallible> {
            self.events.push(format!("member {}", member.name));
            Ok(())
        }

        fn visit_pad(&mut self, _pad: &'ast PadField) -> Result<(), Infallible> {
            self.events.push("pad".into());
            Ok(())
        }

        fn visit_function_bind(&mut self, function: &'ast FunctionBindField) -> Result<(), Infallible> {
            self.events.push(format!("fn {}", function.prototype.name));
            Ok(())
        }
    }

    #[test]
    fn test_walk_order() {
        let mut root = Root::new();
        root.add_class(
            Class::new("A")
                .with_field(Field::member(TypeRef::new("int"), "m_a"))
                .with_field(Field::pad())
                .with_field(Field::function(FunctionPrototype::new("f", TypeRef::new("void")))),
        );
        root.add_class(Class::new("B"));

        let mut recorder = Recorder::default();
        walk_root(&mut recorder, &root).expect("infallible");
        assert_eq!(
            recorder.events,
            vec!["class A", "member m_a", "pad", "fn f", "class B"]
        );
    }

    #[test]
    fn test_error_stops_walk() {
        struct FailOnPad(usize);

        impl<'ast> Visitor<'ast> for FailOnPad {
            type Error = String;

            fn visit_member(&mut self, _member: &'ast MemberField) -> Result<(), String> {
                self.0 += 1;
                Ok(())
            }

            fn visit_pad(&mut self, _pad: &'ast PadField) -> Result<(), String> {
                Err("pad".into())
            }
        }

        let class = Class::new("A")
            .with_field(Field::member(TypeRef::new("int"), "a"))
            .with_field(Field::pad())
            .with_field(Field::member(TypeRef::new("int"), "b"));

        let mut visitor = FailOnPad(0);
        assert_eq!(walk_class(&mut visitor, &class), Err("pad".to_string()));
        assert_eq!(visitor.0, 1);
    }
}
