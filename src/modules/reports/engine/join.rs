// Left joins between fetched records and the records they reference.
//
// References are weak: an id that resolves to nothing yields `None` and the
// owning record is always kept.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

use serde::Serialize;
use uuid::Uuid;

use crate::core::Result;
use crate::modules::follow_ups::models::FollowUp;
use crate::modules::members::models::Member;
use crate::modules::memberships::models::Membership;
use crate::modules::payments::models::Payment;
use crate::modules::personal_training::models::PersonalTraining;
use crate::store::EntityStore;

/// Payment with its member and membership resolved
#[derive(Debug, Clone, Serialize)]
pub struct PaymentWithRefs {
    #[serde(flatten)]
    pub payment: Payment,
    pub member: Option<Member>,
    pub membership: Option<Membership>,
}

/// Follow-up with its member resolved
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpWithMember {
    #[serde(flatten)]
    pub follow_up: FollowUp,
    pub member: Option<Member>,
}

/// Personal-training package with its member resolved
#[derive(Debug, Clone, Serialize)]
pub struct PersonalTrainingWithMember {
    #[serde(flatten)]
    pub personal_training: PersonalTraining,
    pub member: Option<Member>,
}

/// Pair every left record with the right record sharing its key.
///
/// Left order is preserved. A missing or unmatched key pairs with `None`.
pub fn left_join<L, R, K>(
    left: Vec<L>,
    right: Vec<R>,
    left_key: impl Fn(&L) -> Option<K>,
    right_key: impl Fn(&R) -> K,
) -> Vec<(L, Option<R>)>
where
    K: Eq + Hash,
    R: Clone,
{
    let index: HashMap<K, R> = right.into_iter().map(|r| (right_key(&r), r)).collect();
    left.into_iter()
        .map(|l| {
            let matched = left_key(&l).and_then(|k| index.get(&k).cloned());
            (l, matched)
        })
        .collect()
}

/// Distinct referenced ids, in a stable order
pub fn distinct_ids<T>(records: &[T], key: impl Fn(&T) -> Option<Uuid>) -> Vec<Uuid> {
    records
        .iter()
        .filter_map(key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Resolve Payment -> Member and Payment -> Membership, one fetch each
pub async fn join_payments(
    store: &EntityStore,
    payments: Vec<Payment>,
) -> Result<Vec<PaymentWithRefs>> {
    let member_ids = distinct_ids(&payments, |p| Some(p.member_id));
    let membership_ids = distinct_ids(&payments, |p| p.membership_id);

    let members = store.members.find_by_ids(&member_ids).await?;
    let memberships = store.memberships.find_by_ids(&membership_ids).await?;

    let with_members = left_join(payments, members, |p| Some(p.member_id), |m| m.id);
    let joined = left_join(
        with_members,
        memberships,
        |(p, _)| p.membership_id,
        |m| m.id,
    );

    Ok(joined
        .into_iter()
        .map(|((payment, member), membership)| PaymentWithRefs {
            payment,
            member,
            membership,
        })
        .collect())
}

/// Resolve FollowUp -> Member
pub async fn join_follow_ups(
    store: &EntityStore,
    follow_ups: Vec<FollowUp>,
) -> Result<Vec<FollowUpWithMember>> {
    let member_ids = distinct_ids(&follow_ups, |f| Some(f.member_id));
    let members = store.members.find_by_ids(&member_ids).await?;

    Ok(left_join(follow_ups, members, |f| Some(f.member_id), |m| m.id)
        .into_iter()
        .map(|(follow_up, member)| FollowUpWithMember { follow_up, member })
        .collect())
}

/// Resolve PersonalTraining -> Member
pub async fn join_personal_training(
    store: &EntityStore,
    packages: Vec<PersonalTraining>,
) -> Result<Vec<PersonalTrainingWithMember>> {
    let member_ids = distinct_ids(&packages, |p| Some(p.member_id));
    let members = store.members.find_by_ids(&member_ids).await?;

    Ok(left_join(packages, members, |p| Some(p.member_id), |m| m.id)
        .into_iter()
        .map(|(personal_training, member)| PersonalTrainingWithMember {
            personal_training,
            member,
        })
        .collect())
}
