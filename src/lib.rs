#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use alloc::vec::Vec;
use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use allocator_api2::boxed::Box;
use core::alloc::Layout;
use core::fmt;
use core::iter::FusedIterator;

pub use allocator_api2::alloc::AllocError;
pub use adder::add;
pub use adder::add_in;
pub use adder::try_add_in;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod adder;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A non-negative integer as a singly linked list of decimal digits, least
/// significant digit first.
///
/// The empty list represents no number at all, which is distinct from zero
/// (`[0]`). Every node is owned by exactly one list and is allocated with the
/// list's allocator.

pub struct List<A: Allocator = Global> {
  head: Link<A>,
  allocator: A,
}

/// One digit of a [`List`] together with the rest of the list.

pub struct Node<A: Allocator = Global> {
  digit: u8,
  next: Link<A>,
}

/// A digit outside `0 ..= 9` was given while building a [`List`].

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DigitError {
  index: usize,
  digit: u8,
}

/// An iterator over the digits of a [`List`], least significant first.

pub struct Iter<'a, A: Allocator = Global>(Nodes<'a, A>);

/// An iterator over the nodes of a [`List`], head first.

pub struct Nodes<'a, A: Allocator = Global>(Option<&'a Node<A>>);

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

type Link<A> = Option<Box<Node<A>, A>>;

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Layout) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CONSTANTS                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

const RADIX: u8 = 10;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

#[inline(always)]
fn check(index: usize, digit: u8) -> Result<u8, DigitError> {
  if digit < RADIX { Ok(digit) } else { Err(DigitError { index, digit }) }
}

#[inline(always)]
fn node<A, E>(digit: u8, next: Link<A>, allocator: &A) -> Result<Box<Node<A>, A>, E>
where
  A: Allocator + Clone,
  E: Fail,
{
  match Box::try_new_in(Node { digit, next }, allocator.clone()) {
    Ok(x) => Ok(x),
    Err(AllocError) => E::fail(Layout::new::<Node<A>>()),
  }
}

fn build<A, E, I>(digits: I, allocator: A) -> Result<List<A>, E>
where
  A: Allocator + Clone,
  E: Fail,
  I: IntoIterator<Item = u8>,
{
  let mut list = List { head: None, allocator };
  let mut tail = &mut list.head;

  for digit in digits {
    tail = &mut tail.insert(node(digit, None, &list.allocator)?).next;
  }

  Ok(list)
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(layout: Layout) -> Result<T, Self> {
    alloc::alloc::handle_alloc_error(layout)
  }
}

impl Fail for AllocError {
  #[inline(always)]
  fn fail<T>(_: Layout) -> Result<T, Self> {
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl List<Global> {
  /// The empty list, backed by the global allocator.

  pub const fn new() -> Self {
    Self { head: None, allocator: Global }
  }

  /// Builds a list from digits given least significant first.
  ///
  /// # Errors
  ///
  /// An error is returned if any digit is greater than nine.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn from_digits(digits: &[u8]) -> Result<Self, DigitError> {
    Self::from_digits_in(digits, Global)
  }

  /// The digits of `value`. Zero is the single digit `[0]`.

  pub fn from_value(value: u128) -> Self {
    Self::from_value_in(value, Global)
  }
}

impl<A: Allocator> List<A> {
  /// The empty list, backed by `allocator`.

  pub const fn new_in(allocator: A) -> Self {
    Self { head: None, allocator }
  }

  /// The least significant digit, or `None` for the empty list.

  pub fn head(&self) -> Option<&Node<A>> {
    self.head.as_deref()
  }

  /// The digits, least significant first.

  pub fn iter(&self) -> Iter<'_, A> {
    Iter(self.nodes())
  }

  /// The nodes, least significant first.

  pub fn nodes(&self) -> Nodes<'_, A> {
    Nodes(self.head())
  }

  /// The number of digits. Runs in linear time.

  pub fn len(&self) -> usize {
    self.nodes().count()
  }

  /// Whether the list has no digits.

  pub fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// Whether the list is a well-formed number: non-empty, and without a zero
  /// in the most significant position unless the number is zero itself.

  pub fn is_canonical(&self) -> bool {
    match self.nodes().last() {
      None => false,
      Some(last) => last.digit != 0 || self.len() == 1,
    }
  }

  /// The number the list represents, or `None` if the list is empty or the
  /// number does not fit in a `u128`.

  pub fn to_value(&self) -> Option<u128> {
    if self.is_empty() {
      return None;
    }

    let mut value: u128 = 0;
    let mut scale = Some(1_u128);

    for digit in self.iter() {
      if digit != 0 {
        value = value.checked_add(scale?.checked_mul(u128::from(digit))?)?;
      }
      scale = scale.and_then(|s| s.checked_mul(u128::from(RADIX)));
    }

    Some(value)
  }

  /// A reference to the allocator backing the nodes.

  pub fn allocator(&self) -> &A {
    &self.allocator
  }
}

impl<A: Allocator + Clone> List<A> {
  /// Builds a list from digits given least significant first, with nodes
  /// allocated by `allocator`.
  ///
  /// # Errors
  ///
  /// An error is returned if any digit is greater than nine.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn from_digits_in(digits: &[u8], allocator: A) -> Result<Self, DigitError> {
    for (index, &digit) in digits.iter().enumerate() {
      let _ = check(index, digit)?;
    }

    Ok(unwrap(build(digits.iter().copied(), allocator)))
  }

  /// The digits of `value`, with nodes allocated by `allocator`.

  pub fn from_value_in(value: u128, allocator: A) -> Self {
    let mut rest = Some(value);

    let digits = core::iter::from_fn(move || {
      let x = rest?;
      rest = if x >= u128::from(RADIX) { Some(x / u128::from(RADIX)) } else { None };
      Some((x % u128::from(RADIX)) as u8)
    });

    unwrap(build(digits, allocator))
  }

  /// Prepends a new least significant digit, shifting the existing digits up
  /// one decimal place.
  ///
  /// # Panics
  ///
  /// Panics if `digit` is greater than nine, or on failure to allocate memory.

  pub fn push_front(&mut self, digit: u8) {
    if let Err(e) = self.try_push_front(digit) {
      panic!("carrylist: {}", e);
    }
  }

  /// Prepends a new least significant digit.
  ///
  /// # Errors
  ///
  /// An error is returned if `digit` is greater than nine. The list is left
  /// unchanged.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn try_push_front(&mut self, digit: u8) -> Result<(), DigitError> {
    let digit = check(0, digit)?;
    let next = self.head.take();
    self.head = Some(unwrap(node(digit, next, &self.allocator)));
    Ok(())
  }
}

impl Default for List<Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<A: Allocator + Clone> Clone for List<A> {
  fn clone(&self) -> Self {
    unwrap(build(self.iter(), self.allocator.clone()))
  }
}

impl<A: Allocator> Drop for List<A> {
  fn drop(&mut self) {
    // STACK SPACE:
    //
    // Unlinking one node at a time keeps dropping a long list at constant
    // stack depth.

    let mut link = self.head.take();

    while let Some(mut x) = link {
      link = x.next.take();
    }
  }
}

impl<A: Allocator, B: Allocator> PartialEq<List<B>> for List<A> {
  fn eq(&self, other: &List<B>) -> bool {
    self.iter().eq(other.iter())
  }
}

impl<A: Allocator> Eq for List<A> { }

impl<A: Allocator> fmt::Debug for List<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<A: Allocator> fmt::Display for List<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let digits = self.iter().collect::<Vec<u8>>();

    for digit in digits.iter().rev() {
      write!(f, "{}", digit)?;
    }

    Ok(())
  }
}

impl<'a, A: Allocator> IntoIterator for &'a List<A> {
  type Item = u8;
  type IntoIter = Iter<'a, A>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Node                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<A: Allocator> Node<A> {
  /// The digit held by this node, in `0 ..= 9`.

  pub fn digit(&self) -> u8 {
    self.digit
  }

  /// The next more significant node.

  pub fn next(&self) -> Option<&Self> {
    self.next.as_deref()
  }
}

impl<A: Allocator> fmt::Debug for Node<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Node").field(&self.digit).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Iter                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, A: Allocator> Iterator for Iter<'a, A> {
  type Item = u8;

  #[inline(always)]
  fn next(&mut self) -> Option<u8> {
    self.0.next().map(Node::digit)
  }
}

impl<'a, A: Allocator> FusedIterator for Iter<'a, A> { }

impl<'a, A: Allocator> Iterator for Nodes<'a, A> {
  type Item = &'a Node<A>;

  #[inline(always)]
  fn next(&mut self) -> Option<&'a Node<A>> {
    let x = self.0?;
    self.0 = x.next();
    Some(x)
  }
}

impl<'a, A: Allocator> FusedIterator for Nodes<'a, A> { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// DigitError                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl DigitError {
  /// The position of the offending digit, counted from the least significant
  /// end.

  pub fn index(&self) -> usize {
    self.index
  }

  /// The offending digit.

  pub fn digit(&self) -> u8 {
    self.digit
  }
}

impl fmt::Debug for DigitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DigitError")
      .field("index", &self.index)
      .field("digit", &self.digit)
      .finish()
  }
}

impl fmt::Display for DigitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "digit {} at position {} is not in 0..=9", self.digit, self.index)
  }
}

impl core::error::Error for DigitError { }
