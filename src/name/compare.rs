// Copyright 2021 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Hierarchical comparison of [`Name`]s.

use std::cmp::Ordering;

use super::Name;

/// How two names relate in the domain tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NameRelation {
    /// The names are equal.
    Equal,

    /// The first name is a proper subdomain of the second.
    Subdomain,

    /// The first name is a proper superdomain of the second.
    Superdomain,

    /// The names share some non-root ancestor but neither contains the
    /// other.
    CommonAncestor,

    /// The names share only the root.
    None,
}

/// The result of [`Name::compare`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NameComparison {
    /// The canonical (RFC 4034 § 6.1) order of the first name relative
    /// to the second.
    pub order: Ordering,

    /// The number of labels, counted from the root and including it,
    /// that the names have in common.
    pub common_label_count: usize,

    pub relation: NameRelation,
}

impl Name {
    /// Compares two names label by label from the root inward, folding
    /// ASCII case unless `case_sensitive` is set.
    pub fn compare(&self, other: &Name, case_sensitive: bool) -> NameComparison {
        let mut common_label_count = 0;
        let mut nlabels = 0;
        for (mine, theirs) in self.labels().rev().zip(other.labels().rev()) {
            let order = mine.cmp_with_case(&theirs, case_sensitive);
            if order.is_ne() {
                let relation = if nlabels > 0 {
                    NameRelation::CommonAncestor
                } else {
                    NameRelation::None
                };
                return NameComparison {
                    order,
                    common_label_count,
                    relation,
                };
            }
            common_label_count += 1;
            if !mine.is_null() {
                nlabels += 1;
            }
        }

        let order = self.label_count().cmp(&other.label_count());
        let relation = match order {
            Ordering::Less => NameRelation::Superdomain,
            Ordering::Greater => NameRelation::Subdomain,
            Ordering::Equal => NameRelation::Equal,
        };
        NameComparison {
            order,
            common_label_count,
            relation,
        }
    }

    /// Determines whether this name is equal to or a subdomain of
    /// `other`.
    pub fn eq_or_subdomain_of(&self, other: &Name) -> bool {
        matches!(
            self.compare(other, false).relation,
            NameRelation::Equal | NameRelation::Subdomain
        )
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
