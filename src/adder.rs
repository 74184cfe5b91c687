//! Addition of two digit lists with carry propagation.

use crate::build;
use crate::node;
use crate::unwrap;
use crate::AllocError;
use crate::Fail;
use crate::List;
use crate::Node;
use crate::RADIX;
use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;

/// The outcome of adding the digits at one position.

struct Step {
  digit: u8,
  carry: u8,
  last: bool,
}

/// Adds two numbers, returning a new list allocated with the global
/// allocator.
///
/// If both lists are empty the result is empty. If exactly one is empty the
/// result is a copy of the other. The result never shares nodes with either
/// input.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn add<B, C>(l1: &List<B>, l2: &List<C>) -> List
where
  B: Allocator,
  C: Allocator,
{
  add_in(l1, l2, Global)
}

/// Adds two numbers, allocating the nodes of the result with `allocator`.
///
/// # Panics
///
/// Panics on failure to allocate memory.

pub fn add_in<A, B, C>(l1: &List<B>, l2: &List<C>, allocator: A) -> List<A>
where
  A: Allocator + Clone,
  B: Allocator,
  C: Allocator,
{
  unwrap(sum(l1, l2, allocator))
}

/// Adds two numbers, allocating the nodes of the result with `allocator`.
///
/// # Errors
///
/// An error is returned on failure to allocate memory.

pub fn try_add_in<A, B, C>(l1: &List<B>, l2: &List<C>, allocator: A) -> Result<List<A>, AllocError>
where
  A: Allocator + Clone,
  B: Allocator,
  C: Allocator,
{
  sum(l1, l2, allocator)
}

fn sum<A, B, C, E>(l1: &List<B>, l2: &List<C>, allocator: A) -> Result<List<A>, E>
where
  A: Allocator + Clone,
  B: Allocator,
  C: Allocator,
  E: Fail,
{
  match (l1.head(), l2.head()) {
    (None, None) => {
      tracing::trace!("both operands empty");
      Ok(List::new_in(allocator))
    }
    (Some(_), None) => {
      tracing::trace!(len = l1.len(), "right operand empty, copying left");
      build(l1.iter(), allocator)
    }
    (None, Some(_)) => {
      tracing::trace!(len = l2.len(), "left operand empty, copying right");
      build(l2.iter(), allocator)
    }
    (Some(x), Some(y)) => {
      tracing::trace!(lhs = l1.len(), rhs = l2.len(), "adding digit lists");
      add_digits(x, y, allocator)
    }
  }
}

// Walks both lists in lockstep, one output node per position. A list that
// ends early contributes zeros until the other one ends too.

fn add_digits<A, B, C, E>(x: &Node<B>, y: &Node<C>, allocator: A) -> Result<List<A>, E>
where
  A: Allocator + Clone,
  B: Allocator,
  C: Allocator,
  E: Fail,
{
  let mut list = List::new_in(allocator);
  let mut tail = &mut list.head;
  let mut x = Some(x);
  let mut y = Some(y);
  let mut carry = 0;

  loop {
    let s = step(x, y, carry);

    tail = &mut tail.insert(node(s.digit, None, &list.allocator)?).next;

    if s.last {
      if s.carry > 0 {
        *tail = Some(node(s.carry, None, &list.allocator)?);
      }
      break;
    }

    x = x.and_then(Node::next);
    y = y.and_then(Node::next);
    carry = s.carry;
  }

  Ok(list)
}

#[inline(always)]
fn step<B, C>(x: Option<&Node<B>>, y: Option<&Node<C>>, carry: u8) -> Step
where
  B: Allocator,
  C: Allocator,
{
  if x.is_none() && y.is_none() {
    exhausted();
  }

  let n = carry + x.map_or(0, Node::digit) + y.map_or(0, Node::digit);
  let last = ! (x.is_some_and(|x| x.next.is_some()) || y.is_some_and(|y| y.next.is_some()));

  Step { digit: n % RADIX, carry: n / RADIX, last }
}

#[inline(never)]
#[cold]
fn exhausted() -> ! {
  // Neither operand has a digit at the current position. The walk stops at
  // the last position of the longer list, so this is unreachable unless that
  // invariant has been broken.
  panic!("carrylist: digit adder reached a position with no digits on either operand!")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_step_carries() {
    let a = List::from_digits(&[9, 1]).unwrap();
    let b = List::from_digits(&[8]).unwrap();
    let s = step(a.head(), b.head(), 1);
    assert!(s.digit == 8);
    assert!(s.carry == 1);
    assert!(! s.last);
    let s = step(a.head().and_then(Node::next), None::<&Node>, s.carry);
    assert!(s.digit == 2);
    assert!(s.carry == 0);
    assert!(s.last);
  }

  #[test]
  #[should_panic(expected = "no digits on either operand")]
  fn test_step_without_digits() {
    let _ = step::<Global, Global>(None, None, 0);
  }
}
