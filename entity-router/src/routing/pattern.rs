/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Route-pattern grammar and matching.
//!
//! Routes are dot-delimited strings of the form
//! `<Group>.[<SubGroup>.]<AccessMode>.<Operation>`, for example
//! `Sources.Instances.Read.Query` or `Blobs.Write.Publish`. Configured
//! patterns address these routes with exact segments, a bare `*` matching
//! everything, or a trailing `*` segment matching any remaining segments.

/// Matches every route.
pub const WILDCARD: &str = "*";

const SEPARATOR: char = '.';

/// Returns `true` when `pattern` addresses `route`.
///
/// `pattern` is a configured pattern (may contain wildcard segments); `route`
/// is the canonical registry route being requested. Matching is segment-wise:
/// each pattern segment must equal the corresponding route segment, be `*`,
/// or end in `*` as a prefix glob; a final `*` segment matches any remaining
/// route segments.
pub fn is_match(pattern: &str, route: &str) -> bool {
    if pattern == WILDCARD || pattern == route {
        return true;
    }

    let mut route_segments = route.split(SEPARATOR);
    let mut pattern_segments = pattern.split(SEPARATOR).peekable();

    loop {
        match (pattern_segments.next(), route_segments.next()) {
            (None, None) => return true,
            (Some(WILDCARD), _) if pattern_segments.peek().is_none() => return true,
            (Some(segment), Some(route_segment)) => {
                if !segment_matches(segment, route_segment) {
                    return false;
                }
            }
            // Pattern ran out before the route, or the reverse.
            (None, Some(_)) | (Some(_), None) => return false,
        }
    }
}

fn segment_matches(segment: &str, route_segment: &str) -> bool {
    if segment == WILDCARD || segment == route_segment {
        return true;
    }
    match segment.strip_suffix('*') {
        Some(prefix) => route_segment.starts_with(prefix),
        None => false,
    }
}
